//! Search drivers over candidate groups.
//!
//! The scorer is the contract boundary: drivers enumerate k-subsets (how is
//! their concern, including duplicates), ask
//! [`GroupBetweenness::candidate_score`] per candidate, and keep whatever
//! they need: the single best group, the best `count`, or scores for a
//! sampled batch on graphs too large to enumerate exhaustively.

use crate::group::{CandidateOutcome, GroupBetweenness};
use crate::topk::TopGroups;
use crate::Result;
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Lexicographic iterator over all k-subsets of `0..n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, k, indices: (0..k).collect(), exhausted: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();
        // Advance: bump the rightmost index that still has headroom, then
        // reset everything after it to the tightest ascending run.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.exhausted = true;
                break;
            }
            i -= 1;
            if self.indices[i] + (self.k - i) < self.n {
                self.indices[i] += 1;
                for j in i + 1..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

/// Best-scoring group found by a search, with its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub group: Vec<usize>,
    pub score: f64,
}

/// Score every k-subset and return the best-scoring group.
///
/// Disconnected candidates are skipped; any other failure aborts the search.
/// Returns `None` when no candidate could be scored.
pub fn exhaustive_best(scorer: &GroupBetweenness, k: usize) -> Result<Option<SearchResult>> {
    let mut best: Option<SearchResult> = None;
    for group in Combinations::new(scorer.vertex_count(), k) {
        match scorer.candidate_score(&group)? {
            CandidateOutcome::Scored(score) => {
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(SearchResult { group, score });
                }
            }
            CandidateOutcome::Skipped(_) => {}
        }
    }
    Ok(best)
}

/// Like [`exhaustive_best`], but retains the `count` best groups.
pub fn top_groups(scorer: &GroupBetweenness, k: usize, count: usize) -> Result<Vec<SearchResult>> {
    let mut top = TopGroups::new(count);
    for group in Combinations::new(scorer.vertex_count(), k) {
        if let CandidateOutcome::Scored(score) = scorer.candidate_score(&group)? {
            top.push(group, score);
        }
    }
    Ok(top
        .into_sorted()
        .into_iter()
        .map(|(group, score)| SearchResult { group, score })
        .collect())
}

/// Draw `samples` random k-subsets of `0..n`, deterministically from `seed`.
///
/// Members within a group are distinct and sorted; duplicate groups across
/// draws are possible, and de-duplication is the caller's concern.
pub fn sample_groups(n: usize, k: usize, samples: usize, seed: u64) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..samples)
        .map(|_| {
            let mut group = index::sample(&mut rng, n, k).into_vec();
            group.sort_unstable();
            group
        })
        .collect()
}
