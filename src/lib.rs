//! `groupcent`: exact group betweenness centrality for weighted undirected
//! graphs.
//!
//! Preprocessing runs one modified shortest-path sweep per source vertex,
//! collecting distances, shortest-path counts, predecessor sets, and partial
//! dependencies. Afterwards any k-vertex group is scored in O(k²) matrix
//! work via successive updates (Puzis et al. 2007), instead of a fresh
//! computation per candidate group.
//!
//! Public invariants (must not drift):
//! - **Node order**: vertices are dense ids \(0..n\); queries and outputs are
//!   indexed consistently with the input graph (and with
//!   `petgraph::NodeIndex::index()` under the `petgraph` feature).
//! - **Determinism**: identical graphs and configs produce identical scores;
//!   group member order never changes a score.
//! - **Immutability after preprocessing**: engine state never changes once
//!   built, so memoized path-betweenness entries are never invalidated and
//!   group queries may run concurrently.
//!
//! Swappable (allowed to change without breaking the contract):
//! - sweep scheduling (serial vs the `parallel` feature's rayon fan-out)
//! - cache locking strategy (redundant recomputation is tolerated)
//! - internal data structures (so long as invariants hold)

pub mod betweenness;
pub mod edgelist;
pub mod engine;
pub mod graph;
pub mod group;
pub mod search;
pub mod topk;

pub use betweenness::PathBetweennessCache;
pub use edgelist::{parse_edge_list, ParsedEdgeList};
pub use engine::ShortestPathEngine;
pub use graph::UndirectedGraph;
pub use group::{
    CandidateOutcome, GroupBetweenness, GroupBetweennessConfig, SkipReason,
};
pub use search::{exhaustive_best, sample_groups, top_groups, Combinations, SearchResult};
pub use topk::TopGroups;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Negative (or NaN) edge weight seen while building the engine.
    #[error("edge weights must be non-negative, got {0}")]
    InvalidWeight(f64),
    /// The queried group is not pairwise reachable in a disconnected graph.
    #[error("the group is not connected")]
    DisconnectedGroup,
    /// Normalized scores are defined only with periphery excluded.
    #[error("normalized group betweenness requires periphery exclusion")]
    UnsupportedNormalization,
    #[error("vertex index out of bounds: {0}")]
    IndexOutOfBounds(usize),
    #[error("invalid edge list: {0}")]
    InvalidEdgeList(String),
}

pub type Result<T> = std::result::Result<T, Error>;
