//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Bounded collector keeping the `cap` highest-scoring groups.
#[derive(Debug, Default)]
pub struct TopGroups {
    cap: usize,
    heap: BinaryHeap<Reverse<(NotNan<f64>, Vec<usize>)>>,
}

impl TopGroups {
    pub fn new(cap: usize) -> Self {
        Self { cap, heap: BinaryHeap::with_capacity(cap + 1) }
    }

    /// Offer a scored group; non-finite scores are discarded.
    pub fn push(&mut self, group: Vec<usize>, score: f64) {
        if self.cap == 0 || !score.is_finite() {
            return;
        }
        let Ok(score) = NotNan::new(score) else { return };
        if self.heap.len() < self.cap {
            self.heap.push(Reverse((score, group)));
        } else if let Some(Reverse((weakest, _))) = self.heap.peek() {
            if score > *weakest {
                self.heap.pop();
                self.heap.push(Reverse((score, group)));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into `(group, score)` pairs, best first.
    pub fn into_sorted(self) -> Vec<(Vec<usize>, f64)> {
        let mut results: Vec<(Vec<usize>, f64)> = self
            .heap
            .into_iter()
            .map(|Reverse((score, group))| (group, score.into_inner()))
            .collect();
        results.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        results
    }
}
