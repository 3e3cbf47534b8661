//! Minimal directed graph adapter traits.
//!
//! The index copies adjacency out of any [`Graph`] once, at build time. Node ids are
//! dense `0..node_count()`; callers are responsible for keeping them in range.

pub trait Graph {
    fn node_count(&self) -> usize;
    fn successors(&self, node: usize) -> Vec<usize>;
    fn predecessors(&self, node: usize) -> Vec<usize>;
    fn out_degree(&self, node: usize) -> usize {
        self.successors(node).len()
    }
    fn in_degree(&self, node: usize) -> usize {
        self.predecessors(node).len()
    }
}

/// A graph view that can return **borrowed** neighbor slices.
///
/// Traversals over the built index go through this so that no step allocates.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn successors_ref(&self, node: usize) -> &[usize];
    fn predecessors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.successors_ref(node).len()
    }
    fn in_degree(&self, node: usize) -> usize {
        self.predecessors_ref(node).len()
    }
}

/// Owned forward and reverse adjacency lists.
///
/// Edge order is preserved per node; multi-edges and self-loops are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyLists {
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl AdjacencyLists {
    pub fn new(node_count: usize) -> Self {
        Self { out_adj: vec![Vec::new(); node_count], in_adj: vec![Vec::new(); node_count] }
    }

    /// Build from `u -> v` edges. Panics if an endpoint is out of range.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::new(node_count);
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.out_adj[u].push(v);
        self.in_adj[v].push(u);
    }

    pub fn edge_count(&self) -> usize {
        self.out_adj.iter().map(Vec::len).sum()
    }
}

impl Graph for AdjacencyLists {
    fn node_count(&self) -> usize {
        self.out_adj.len()
    }
    fn successors(&self, node: usize) -> Vec<usize> {
        self.out_adj[node].clone()
    }
    fn predecessors(&self, node: usize) -> Vec<usize> {
        self.in_adj[node].clone()
    }
}

impl GraphRef for AdjacencyLists {
    fn node_count(&self) -> usize {
        self.out_adj.len()
    }
    fn successors_ref(&self, node: usize) -> &[usize] {
        &self.out_adj[node]
    }
    fn predecessors_ref(&self, node: usize) -> &[usize] {
        &self.in_adj[node]
    }
}

#[cfg(feature = "petgraph")]
impl<N, E, Ix> Graph for petgraph::Graph<N, E, petgraph::Directed, Ix>
where
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        self.node_count()
    }
    fn successors(&self, node: usize) -> Vec<usize> {
        // petgraph yields most recently added edges first.
        let mut out: Vec<usize> = self
            .neighbors_directed(petgraph::graph::NodeIndex::new(node), petgraph::Direction::Outgoing)
            .map(|idx| idx.index())
            .collect();
        out.reverse();
        out
    }
    fn predecessors(&self, node: usize) -> Vec<usize> {
        let mut inc: Vec<usize> = self
            .neighbors_directed(petgraph::graph::NodeIndex::new(node), petgraph::Direction::Incoming)
            .map(|idx| idx.index())
            .collect();
        inc.reverse();
        inc
    }
}
