//! Weighted undirected multigraph storage.
//!
//! Vertices are dense indices `0..n`; every edge is mirrored into both
//! endpoints' adjacency lists with the same weight, so traversal never needs
//! a direction case. Parallel edges are distinct entries and increase
//! shortest-path multiplicity downstream.
//!
//! Self-loops and out-of-range endpoints are ignored on insertion (callers
//! should validate, but be robust). Negative weights are representable here;
//! they are a usage error that [`crate::ShortestPathEngine`] rejects at
//! construction.

#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl UndirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(n: usize) -> Self {
        Self { adjacency: vec![Vec::new(); n], edge_count: 0 }
    }

    /// Append a new vertex and return its index.
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Insert an undirected edge `u -- v` with the given weight.
    ///
    /// Returns `true` if the edge was stored; self-loops and out-of-range
    /// endpoints are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> bool {
        let n = self.adjacency.len();
        if u == v || u >= n || v >= n {
            return false;
        }
        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        self.edge_count += 1;
        true
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Incident `(neighbor, weight)` entries of `v`, one per edge end.
    ///
    /// Borrowed slice: the shortest-path sweeps iterate incidence lists on
    /// every relaxation and must not allocate per visit.
    pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    /// Iterate every stored edge once, as `(u, v, weight)` with `u < v`.
    /// Parallel edges yield one item each.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, incident)| {
            incident.iter().filter_map(move |&(v, w)| (u < v).then_some((u, v, w)))
        })
    }
}

#[cfg(feature = "petgraph")]
impl UndirectedGraph {
    /// Import an undirected petgraph with `f64` edge weights.
    ///
    /// Dense ids follow `NodeIndex::index()`.
    pub fn from_petgraph<N, Ix>(
        graph: &petgraph::Graph<N, f64, petgraph::Undirected, Ix>,
    ) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        use petgraph::visit::EdgeRef;

        let mut out = Self::with_vertices(graph.node_count());
        for edge in graph.edge_references() {
            out.add_edge(edge.source().index(), edge.target().index(), *edge.weight());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_mirrored() {
        let mut g = UndirectedGraph::with_vertices(3);
        assert!(g.add_edge(0, 1, 2.0));
        assert!(g.add_edge(1, 2, 0.5));

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(1), &[(0, 2.0), (2, 0.5)]);
        assert_eq!(g.neighbors(2), &[(1, 0.5)]);
        assert_eq!(g.degree(1), 2);
    }

    #[test]
    fn self_loops_and_out_of_range_are_ignored() {
        let mut g = UndirectedGraph::with_vertices(2);
        assert!(!g.add_edge(0, 0, 1.0));
        assert!(!g.add_edge(0, 5, 1.0));
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(0).is_empty());
    }

    #[test]
    fn parallel_edges_are_distinct() {
        let mut g = UndirectedGraph::with_vertices(2);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 1, 1.0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.edges().count(), 2);
    }

    #[test]
    fn add_vertex_grows_the_graph() {
        let mut g = UndirectedGraph::new();
        let a = g.add_vertex();
        let b = g.add_vertex();
        assert_eq!((a, b), (0, 1));
        assert!(g.add_edge(a, b, 1.0));
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn from_petgraph_preserves_indices_and_weights() {
        let mut pg: petgraph::Graph<(), f64, petgraph::Undirected> =
            petgraph::Graph::new_undirected();
        let a = pg.add_node(());
        let b = pg.add_node(());
        let c = pg.add_node(());
        pg.add_edge(a, b, 1.5);
        pg.add_edge(b, c, 2.5);

        let g = UndirectedGraph::from_petgraph(&pg);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.neighbors(b.index()), &[(a.index(), 1.5), (c.index(), 2.5)]);
    }
}
