//! The built, read-only reachability index.

use tracing::debug;

use crate::build::label_table;
use crate::config::{IndexConfig, DEFAULT_WORDS};
use crate::graph::{Graph, GraphRef};
use crate::label::Label;
use crate::node::{Interval, Node, NodeTable};

/// Labels, intervals and adjacency for every node of a DAG.
///
/// `K` is the label width in 32-bit words. Once built the index is never mutated; query
/// state lives in an [`Oracle`](crate::Oracle) borrowing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachIndex<const K: usize = DEFAULT_WORDS> {
    table: NodeTable<K>,
    config: IndexConfig,
}

/// Build an index with the default label width.
pub fn build_index<G: Graph>(graph: &G, config: IndexConfig) -> ReachIndex {
    ReachIndex::build(graph, config)
}

impl<const K: usize> ReachIndex<K> {
    /// Copy `graph`'s adjacency and run both labelling passes.
    ///
    /// Every node must reach a source via predecessors and a sink via successors (true
    /// for any DAG). Nodes that do not stay unlabelled, and answers involving them are
    /// unspecified.
    pub fn build<G: Graph>(graph: &G, config: IndexConfig) -> Self {
        let mut table = NodeTable::from_graph(graph);
        label_table(&mut table, &config);
        let index = Self { table, config };
        debug!(nodes = index.node_count(), words = K, index_bytes = index.index_bytes(), "index built");
        index
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.table.len()
    }

    pub fn node(&self, node: usize) -> &Node<K> {
        self.table.node(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<K>> {
        self.table.iter()
    }

    pub fn interval(&self, node: usize) -> Interval {
        self.table.node(node).interval
    }

    pub fn descendant_label(&self, node: usize) -> &Label<K> {
        &self.table.node(node).descendants
    }

    pub fn ancestor_label(&self, node: usize) -> &Label<K> {
        &self.table.node(node).ancestors
    }

    /// Compact footprint of labels and intervals, in bytes.
    ///
    /// A scalar label needs one byte while `K * 32` fits in a byte's range of positions
    /// (`K <= 8`), four otherwise; a vector label needs `4 * K`. Intervals count as two
    /// 32-bit bounds. Adjacency is not included.
    pub fn index_bytes(&self) -> usize {
        let scalar = if K > 8 { 4 } else { 1 };
        let vector = 4 * K;
        let label = |l: &Label<K>| if l.is_scalar() { scalar } else { vector };
        self.table
            .iter()
            .map(|n| label(&n.ancestors) + label(&n.descendants) + 2 * 4)
            .sum()
    }
}

impl<const K: usize> GraphRef for ReachIndex<K> {
    fn node_count(&self) -> usize {
        self.table.len()
    }
    fn successors_ref(&self, node: usize) -> &[usize] {
        self.table.successors_ref(node)
    }
    fn predecessors_ref(&self, node: usize) -> &[usize] {
        self.table.predecessors_ref(node)
    }
}
