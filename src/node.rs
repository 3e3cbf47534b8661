//! Per-node adjacency and index fields.

use crate::graph::{Graph, GraphRef};
use crate::label::Label;

/// Discovery/finish window from the descendant pass.
///
/// `start` is taken from the discovery clock on entry, `finish` is the clock value once
/// every successor is done, so `start < finish` for every labelled node and an ancestor's
/// window contains each of its tree descendants' windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub start: usize,
    pub finish: usize,
}

impl Interval {
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.finish <= self.finish
    }
}

/// Which reachable set a label summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// Labels built over predecessors, seeded at sinks.
    Ancestors,
    /// Labels built over successors, seeded at sources; also assigns intervals.
    Descendants,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<const K: usize> {
    pub(crate) out_adj: Vec<usize>,
    pub(crate) in_adj: Vec<usize>,
    pub(crate) descendants: Label<K>,
    pub(crate) ancestors: Label<K>,
    pub(crate) interval: Interval,
}

impl<const K: usize> Node<K> {
    fn new(out_adj: Vec<usize>, in_adj: Vec<usize>) -> Self {
        let placeholder = |adj: &[usize]| {
            if adj.is_empty() {
                Label::Scalar(0)
            } else {
                Label::empty_vector()
            }
        };
        Self {
            descendants: placeholder(&out_adj),
            ancestors: placeholder(&in_adj),
            out_adj,
            in_adj,
            interval: Interval::default(),
        }
    }

    pub fn successors(&self) -> &[usize] {
        &self.out_adj
    }

    pub fn predecessors(&self) -> &[usize] {
        &self.in_adj
    }

    pub fn descendant_label(&self) -> &Label<K> {
        &self.descendants
    }

    pub fn ancestor_label(&self) -> &Label<K> {
        &self.ancestors
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Neighbors a pass on `side` recurses into.
    pub(crate) fn adjacent(&self, side: Side) -> &[usize] {
        match side {
            Side::Ancestors => &self.in_adj,
            Side::Descendants => &self.out_adj,
        }
    }

    /// Neighbors in the opposite direction; empty means the node seeds the pass.
    pub(crate) fn opposite(&self, side: Side) -> &[usize] {
        match side {
            Side::Ancestors => &self.out_adj,
            Side::Descendants => &self.in_adj,
        }
    }

    pub(crate) fn label(&self, side: Side) -> &Label<K> {
        match side {
            Side::Ancestors => &self.ancestors,
            Side::Descendants => &self.descendants,
        }
    }

    pub(crate) fn label_mut(&mut self, side: Side) -> &mut Label<K> {
        match side {
            Side::Ancestors => &mut self.ancestors,
            Side::Descendants => &mut self.descendants,
        }
    }
}

/// Owns every node; sized once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable<const K: usize> {
    pub(crate) nodes: Vec<Node<K>>,
}

impl<const K: usize> NodeTable<K> {
    pub fn from_graph<G: Graph>(graph: &G) -> Self {
        let nodes = (0..graph.node_count())
            .map(|u| Node::new(graph.successors(u), graph.predecessors(u)))
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node: usize) -> &Node<K> {
        &self.nodes[node]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node<K>> {
        self.nodes.iter()
    }
}

impl<const K: usize> GraphRef for NodeTable<K> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
    fn successors_ref(&self, node: usize) -> &[usize] {
        &self.nodes[node].out_adj
    }
    fn predecessors_ref(&self, node: usize) -> &[usize] {
        &self.nodes[node].in_adj
    }
}
