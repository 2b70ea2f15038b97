//! Per-source shortest-path preprocessing.
//!
//! For every vertex acting as source, one label-setting sweep computes
//! shortest distances, shortest-path counts, predecessor sets, and
//! accumulated partial dependencies over the whole reachable set. The sweep
//! results are frozen into one immutable record per source; every query
//! afterwards is a pure read, so group scoring can hit this state from any
//! number of threads.
//!
//! The dependency accumulation is the endpoint-inclusive variant used by
//! successive group betweenness: each settled vertex contributes 1 to its own
//! dependency before propagating to its predecessors, and propagation also
//! flows into the source vertex itself.
//!
//! Complexity: n sweeps of O(m log n) each; the one-time cost amortized
//! across all later group queries.

use crate::graph::UndirectedGraph;
use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Min-heap entry keyed by tentative distance.
struct QueueEntry {
    distance: f64,
    vertex: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex && self.distance == other.distance
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Reversed so the max-heap pops the smallest tentative distance.
        other.distance.partial_cmp(&self.distance)
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Results of one source sweep. Built once, immutable afterwards.
#[derive(Debug, Clone)]
struct SourceSweep {
    /// `f64::INFINITY` = unreachable.
    distance: Vec<f64>,
    /// Number of minimum-weight paths from the source (source itself: 1).
    path_count: Vec<u64>,
    /// Predecessor multiset per target: one entry per tying shortest edge,
    /// so parallel edges carry multiplicity into counts and dependencies.
    predecessors: Vec<Vec<usize>>,
    /// Endpoint-inclusive partial dependencies.
    dependency: Vec<f64>,
    reachable: usize,
}

/// Shortest-path and dependency statistics for every source vertex.
///
/// Construction validates edge weights and runs the full preprocessing pass;
/// all methods afterwards are pure reads. Vertex arguments index `0..n` as in
/// the input graph.
pub struct ShortestPathEngine {
    vertex_count: usize,
    sweeps: Vec<SourceSweep>,
}

impl ShortestPathEngine {
    /// Run the preprocessing pass over every source in `graph`.
    ///
    /// Fails with [`Error::InvalidWeight`] on any negative (or NaN) edge
    /// weight, before any sweep state is built. With the `parallel` feature
    /// the per-source sweeps run on the rayon pool; the collect joins them
    /// all before any query can be served.
    pub fn new(graph: &UndirectedGraph) -> Result<Self> {
        for (_, _, weight) in graph.edges() {
            if !(weight >= 0.0) {
                return Err(Error::InvalidWeight(weight));
            }
        }
        let n = graph.vertex_count();

        #[cfg(feature = "parallel")]
        let sweeps = (0..n)
            .into_par_iter()
            .map(|source| single_source_sweep(graph, source))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let sweeps = (0..n).map(|source| single_source_sweep(graph, source)).collect();

        Ok(Self { vertex_count: n, sweeps })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Shortest-path weight from `source` to `target`; `None` if unreachable.
    pub fn distance(&self, source: usize, target: usize) -> Option<f64> {
        let d = self.sweeps[source].distance[target];
        d.is_finite().then_some(d)
    }

    /// Number of minimum-weight paths from `source` to `target`
    /// (0 if unreachable, 1 for the source itself).
    pub fn path_count(&self, source: usize, target: usize) -> u64 {
        self.sweeps[source].path_count[target]
    }

    /// Number of shortest `source -> target` paths passing through
    /// `intermediary`, by the Bellman criterion: nonzero only when
    /// `d(s,t) == d(s,i) + d(i,t)`, in which case it is
    /// `σ(s,i) * σ(i,t)`. Missing distances yield 0, never an error.
    pub fn path_count_via(&self, source: usize, intermediary: usize, target: usize) -> u64 {
        let (Some(st), Some(si), Some(it)) = (
            self.distance(source, target),
            self.distance(source, intermediary),
            self.distance(intermediary, target),
        ) else {
            return 0;
        };
        if st != si + it {
            return 0;
        }
        self.path_count(source, intermediary) * self.path_count(intermediary, target)
    }

    /// Sum of `path_count(source, t)` over all targets `t != source`.
    pub fn total_path_count(&self, source: usize) -> u64 {
        let sweep = &self.sweeps[source];
        (0..self.vertex_count)
            .filter(|&t| t != source)
            .map(|t| sweep.path_count[t])
            .sum()
    }

    /// Vertices immediately preceding `target` on some shortest path from
    /// `source`, de-duplicated and sorted. The source has no predecessors.
    pub fn predecessors(&self, source: usize, target: usize) -> Vec<usize> {
        let mut preds = self.sweeps[source].predecessors[target].clone();
        preds.sort_unstable();
        preds.dedup();
        preds
    }

    /// Accumulated dependency of `intermediary` in the sweep rooted at
    /// `source` (0 if unreachable).
    pub fn partial_dependency(&self, source: usize, intermediary: usize) -> f64 {
        self.sweeps[source].dependency[intermediary]
    }

    /// True iff every source reaches every vertex.
    pub fn is_connected(&self) -> bool {
        self.sweeps.iter().all(|sweep| sweep.reachable == self.vertex_count)
    }

    /// Size of the reachable set from `source`, the source included.
    pub fn reachable_count(&self, source: usize) -> usize {
        self.sweeps[source].reachable
    }
}

fn single_source_sweep(graph: &UndirectedGraph, source: usize) -> SourceSweep {
    let n = graph.vertex_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut path_count = vec![0u64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut settled = vec![false; n];
    let mut order = Vec::with_capacity(n);

    distance[source] = 0.0;
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry { distance: 0.0, vertex: source });

    while let Some(QueueEntry { distance: settled_dist, vertex }) = queue.pop() {
        if settled[vertex] {
            continue; // stale entry superseded by a later improvement
        }
        settled[vertex] = true;
        order.push(vertex);
        // Freezing the incoming multiset: the path count sums over every
        // tying shortest edge, so parallel edges multiply.
        path_count[vertex] = if vertex == source {
            1
        } else {
            predecessors[vertex].iter().map(|&p| path_count[p]).sum()
        };

        for &(neighbor, weight) in graph.neighbors(vertex) {
            if settled[neighbor] {
                continue;
            }
            let candidate = settled_dist + weight;
            if candidate < distance[neighbor] {
                distance[neighbor] = candidate;
                predecessors[neighbor].clear();
                predecessors[neighbor].push(vertex);
                queue.push(QueueEntry { distance: candidate, vertex: neighbor });
            } else if candidate == distance[neighbor] {
                // Tie: both paths are shortest.
                predecessors[neighbor].push(vertex);
            }
        }
    }

    // Dependency accumulation in reverse settlement order (farthest first).
    // Each settled vertex first counts as a path endpoint, then its current
    // dependency propagates to every predecessor entry.
    let mut dependency = vec![0.0; n];
    for &w in order.iter().rev() {
        if w == source {
            continue; // predecessors of the source are not defined
        }
        dependency[w] += 1.0;
        let dep_w = dependency[w];
        let count_w = path_count[w] as f64;
        for &p in &predecessors[w] {
            dependency[p] += path_count[p] as f64 / count_w * dep_w;
        }
    }

    let reachable = order.len();
    SourceSweep { distance, path_count, predecessors, dependency, reachable }
}
