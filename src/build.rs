//! Label construction: two depth-first passes over the node table.
//!
//! - The ancestor pass starts at every sink and walks predecessors.
//! - The descendant pass starts at every source, walks successors, and stamps intervals.
//!
//! Both passes keep an explicit stack of `(node, cursor)` frames, so graph depth never
//! touches the call stack. Hash draws happen in the same order a recursive formulation
//! would make them: a leaf draws on entry, an inner node draws its self bit after all of
//! its neighbors are merged.

use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::hash::HashStream;
use crate::label::{set_hashed_bit, Label};
use crate::node::{Node, NodeTable, Side};
use crate::visit::VisitStamps;

/// Outcome of one labelling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub seeds: usize,
    pub labelled: usize,
}

/// Populate ancestor labels, descendant labels and intervals in place.
pub fn label_table<const K: usize>(
    table: &mut NodeTable<K>,
    config: &IndexConfig,
) -> (PassSummary, PassSummary) {
    let n = table.len();
    let batch = config.batch_size(n, K);
    let mut visited = VisitStamps::new(n);

    let mut ancestor_stream = HashStream::new(batch, config.seed.wrapping_add(1));
    let ancestors = LabelPass::new(&mut table.nodes, Side::Ancestors, &mut ancestor_stream, &mut visited).run();

    let mut descendant_stream = HashStream::new(batch, config.seed);
    let descendants =
        LabelPass::new(&mut table.nodes, Side::Descendants, &mut descendant_stream, &mut visited).run();

    for (side, summary) in [(Side::Ancestors, ancestors), (Side::Descendants, descendants)] {
        debug!(?side, seeds = summary.seeds, labelled = summary.labelled, batch, "label pass complete");
        if summary.labelled < n {
            warn!(
                ?side,
                unlabelled = n - summary.labelled,
                "nodes unreachable from any seed; input is not a DAG, answers involving them are unspecified"
            );
        }
    }

    (ancestors, descendants)
}

struct LabelPass<'a, const K: usize> {
    nodes: &'a mut [Node<K>],
    side: Side,
    stream: &'a mut HashStream,
    visited: &'a mut VisitStamps,
    clock: usize,
    stack: Vec<(usize, usize)>,
    labelled: usize,
}

impl<'a, const K: usize> LabelPass<'a, K> {
    fn new(
        nodes: &'a mut [Node<K>],
        side: Side,
        stream: &'a mut HashStream,
        visited: &'a mut VisitStamps,
    ) -> Self {
        Self { nodes, side, stream, visited, clock: 0, stack: Vec::new(), labelled: 0 }
    }

    fn run(mut self) -> PassSummary {
        // A fresh epoch keeps this pass independent of any earlier one.
        self.visited.advance();
        let mut seeds = 0;
        for seed in 0..self.nodes.len() {
            if !self.nodes[seed].opposite(self.side).is_empty() {
                continue;
            }
            seeds += 1;
            if !self.visited.is_visited(seed) {
                self.descend_from(seed);
            }
        }
        PassSummary { seeds, labelled: self.labelled }
    }

    fn descend_from(&mut self, seed: usize) {
        self.enter(seed);
        while let Some(&(u, cursor)) = self.stack.last() {
            let next = self.nodes[u].adjacent(self.side).get(cursor).copied();
            let Some(v) = next else {
                self.stack.pop();
                let raw = self.stream.next_raw();
                if let Label::Vector(words) = self.nodes[u].label_mut(self.side) {
                    set_hashed_bit(words, raw);
                }
                self.leave(u);
                continue;
            };
            if !self.visited.is_visited(v) {
                // Merged on the next iteration, once `v` is finished.
                self.enter(v);
                continue;
            }
            let contribution = *self.nodes[v].label(self.side);
            if let Label::Vector(words) = self.nodes[u].label_mut(self.side) {
                contribution.merge_into(words);
            }
            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }
        }
    }

    fn enter(&mut self, u: usize) {
        self.visited.visit(u);
        self.labelled += 1;
        if self.side == Side::Descendants {
            self.nodes[u].interval.start = self.clock;
            self.clock += 1;
        }
        if self.nodes[u].adjacent(self.side).is_empty() {
            *self.nodes[u].label_mut(self.side) = Label::scalar_from(self.stream.next_raw());
            self.leave(u);
        } else {
            *self.nodes[u].label_mut(self.side) = Label::empty_vector();
            self.stack.push((u, 0));
        }
    }

    fn leave(&mut self, u: usize) {
        if self.side == Side::Descendants {
            self.nodes[u].interval.finish = self.clock;
        }
    }
}
