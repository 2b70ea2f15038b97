//! Successive group betweenness centrality.
//!
//! Scores an arbitrary vertex subset by how much shortest-path traffic flows
//! through it, using the successive-update algorithm of Puzis et al. (2007):
//! after the engine's one-time preprocessing, any k-member group costs O(k²)
//! matrix work instead of a fresh all-pairs computation.
//!
//! Periphery handling: with `include_periphery` the score also counts paths
//! that start or end inside the group; without it (the default, matching the
//! Everett–Borgatti definition) those are subtracted by a closed-form
//! correction, and only then is the normalized variant defined.

use crate::betweenness::PathBetweennessCache;
use crate::engine::ShortestPathEngine;
use crate::graph::UndirectedGraph;
use crate::{Error, Result};

/// Scoring options.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupBetweennessConfig {
    /// Count shortest paths that start or end inside the scored group.
    pub include_periphery: bool,
}

impl Default for GroupBetweennessConfig {
    fn default() -> Self {
        Self { include_periphery: false }
    }
}

/// Per-candidate search outcome: a disconnected-group skip is
/// distinguishable from a real defect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateOutcome {
    Scored(f64),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DisconnectedGroup,
}

/// Group betweenness scorer over a weighted undirected graph.
///
/// Owns the preprocessed engine and the pairwise path-betweenness cache;
/// both are immutable after construction, so any number of group queries may
/// run concurrently. Each query works on private k×k scratch matrices.
pub struct GroupBetweenness {
    engine: ShortestPathEngine,
    cache: PathBetweennessCache,
    config: GroupBetweennessConfig,
    connected: bool,
}

impl GroupBetweenness {
    /// Build the scorer: validates weights and runs the full preprocessing
    /// pass (the dominant O(n·m·log n) cost, paid once).
    pub fn new(graph: &UndirectedGraph, config: GroupBetweennessConfig) -> Result<Self> {
        let engine = ShortestPathEngine::new(graph)?;
        let connected = engine.is_connected();
        Ok(Self { engine, cache: PathBetweennessCache::new(), config, connected })
    }

    pub fn engine(&self) -> &ShortestPathEngine {
        &self.engine
    }

    pub fn vertex_count(&self) -> usize {
        self.engine.vertex_count()
    }

    pub fn config(&self) -> GroupBetweennessConfig {
        self.config
    }

    /// Betweenness of `group`. Duplicate members are ignored; member order
    /// never changes the result.
    ///
    /// Fails with [`Error::DisconnectedGroup`] when the graph is
    /// disconnected and the group is not pairwise reachable, and with
    /// [`Error::IndexOutOfBounds`] on members outside `0..n`. A failed query
    /// leaves engine and cache untouched.
    pub fn group_score(&self, group: &[usize]) -> Result<f64> {
        let members = self.validated_members(group)?;
        Ok(self.score_members(&members))
    }

    /// Normalized group betweenness in `[0, 1]`.
    ///
    /// Defined only with periphery excluded
    /// ([`Error::UnsupportedNormalization`] otherwise). The denominator pairs
    /// the group against either the whole graph or its own connected
    /// component; a group spanning its entire component scores 0.
    pub fn normalized_group_score(
        &self,
        group: &[usize],
        relative_to_whole_graph: bool,
    ) -> Result<f64> {
        if self.config.include_periphery {
            return Err(Error::UnsupportedNormalization);
        }
        let members = self.validated_members(group)?;
        let score = self.score_members(&members);
        let component = if relative_to_whole_graph {
            self.engine.vertex_count()
        } else {
            self.component_size(&members)
        };
        let free = component as f64 - members.len() as f64;
        let divisor = free * (free - 1.0);
        if divisor == 0.0 {
            Ok(0.0)
        } else {
            Ok(2.0 * score / divisor)
        }
    }

    /// [`group_score`](Self::group_score) for search drivers: a
    /// disconnected candidate becomes [`CandidateOutcome::Skipped`] instead
    /// of an error, anything else still propagates.
    pub fn candidate_score(&self, group: &[usize]) -> Result<CandidateOutcome> {
        match self.group_score(group) {
            Ok(score) => Ok(CandidateOutcome::Scored(score)),
            Err(Error::DisconnectedGroup) => {
                Ok(CandidateOutcome::Skipped(SkipReason::DisconnectedGroup))
            }
            Err(other) => Err(other),
        }
    }

    fn validated_members(&self, group: &[usize]) -> Result<Vec<usize>> {
        let n = self.engine.vertex_count();
        let mut members = Vec::with_capacity(group.len());
        for &v in group {
            if v >= n {
                return Err(Error::IndexOutOfBounds(v));
            }
            if !members.contains(&v) {
                members.push(v);
            }
        }
        if !self.connected && !self.pairwise_reachable(&members) {
            return Err(Error::DisconnectedGroup);
        }
        Ok(members)
    }

    fn pairwise_reachable(&self, members: &[usize]) -> bool {
        members
            .iter()
            .all(|&x| members.iter().all(|&y| self.engine.distance(x, y).is_some()))
    }

    /// Size of the connected component containing the group.
    fn component_size(&self, members: &[usize]) -> usize {
        members.iter().map(|&v| self.engine.reachable_count(v)).max().unwrap_or(0)
    }

    /// The successive update loop. `members` are de-duplicated, in-range,
    /// and pairwise reachable.
    fn score_members(&self, members: &[usize]) -> f64 {
        let k = members.len();
        let dist: Vec<Vec<f64>> = members
            .iter()
            .map(|&x| {
                members
                    .iter()
                    .map(|&y| self.engine.distance(x, y).unwrap_or(f64::INFINITY))
                    .collect()
            })
            .collect();
        let mut sigma: Vec<Vec<f64>> = members
            .iter()
            .map(|&x| members.iter().map(|&y| self.engine.path_count(x, y) as f64).collect())
            .collect();
        let mut pb: Vec<Vec<f64>> = members
            .iter()
            .map(|&x| {
                members
                    .iter()
                    .map(|&y| self.cache.path_betweenness(&self.engine, x, y))
                    .collect()
            })
            .collect();

        let mut total = 0.0;
        for v in 0..k {
            // Paths already accounted to v before its removal effects are
            // folded into the matrices.
            total += pb[v][v];

            let mut sigma_next = vec![vec![0.0; k]; k];
            let mut pb_next = vec![vec![0.0; k]; k];
            for x in 0..k {
                for y in 0..k {
                    let mut share_xyv = 0.0;
                    let mut share_xvy = 0.0;
                    let mut share_vxy = 0.0;
                    if sigma[x][y] != 0.0 && sigma[x][v] != 0.0 && sigma[y][v] != 0.0 {
                        if dist[x][v] == dist[x][y] + dist[y][v] {
                            share_xyv = sigma[x][y] * sigma[y][v] / sigma[x][v];
                        }
                        if dist[x][y] == dist[x][v] + dist[v][y] {
                            share_xvy = sigma[x][v] * sigma[v][y] / sigma[x][y];
                        }
                        if dist[v][y] == dist[v][x] + dist[x][y] {
                            share_vxy = sigma[v][x] * sigma[x][y] / sigma[v][y];
                        }
                    }
                    // Path mass routing through v is absorbed into the group.
                    sigma_next[x][y] = sigma[x][y] * (1.0 - share_xvy);
                    let mut updated = pb[x][y] * (1.0 - share_xvy);
                    if y != v {
                        updated -= pb[x][v] * share_xyv;
                    }
                    if x != v {
                        updated -= pb[v][y] * share_vxy;
                    }
                    pb_next[x][y] = updated;
                }
            }
            sigma = sigma_next;
            pb = pb_next;
        }

        // Each contributing pair was counted from both traversal directions.
        let mut score = total / 2.0;
        if !self.config.include_periphery {
            let k_f = k as f64;
            let component = self.component_size(members) as f64;
            score -= k_f * (2.0 * component - k_f - 1.0) / 2.0;
        }
        score
    }
}
