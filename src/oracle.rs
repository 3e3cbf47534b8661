//! Point reachability queries against a built [`ReachIndex`].
//!
//! A query is resolved by the first tier that can decide it:
//! 1. interval containment (definite negative or definite positive),
//! 2. structural negatives (target has no predecessors, source has no successors),
//! 3. the descendant and ancestor bit-vector filters (negatives only),
//! 4. a forward depth-first search that re-applies tiers 1-3 at every node it pops.
//!
//! Tiers 1-3 never give a wrong definite answer, so the search only ever prunes
//! branches that cannot contain the target.

use crate::config::DEFAULT_WORDS;
use crate::graph::GraphRef;
use crate::index::ReachIndex;
use crate::visit::VisitStamps;

/// Which step of the query decided the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Interval,
    Structural,
    Filter,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub reachable: bool,
    pub tier: Tier,
}

impl Resolution {
    fn new(reachable: bool, tier: Tier) -> Self {
        Self { reachable, tier }
    }
}

impl<const K: usize> ReachIndex<K> {
    /// Try to decide `source -> target` from labels alone.
    ///
    /// Returns `None` when no label test is conclusive.
    pub fn shortcut(&self, source: usize, target: usize) -> Option<Resolution> {
        let (s, t) = (self.node(source), self.node(target));

        let (si, ti) = (s.interval, t.interval);
        if si.finish < ti.finish {
            return Some(Resolution::new(false, Tier::Interval));
        }
        if si.start <= ti.start {
            return Some(Resolution::new(true, Tier::Interval));
        }

        if t.in_adj.is_empty() || s.out_adj.is_empty() {
            return Some(Resolution::new(false, Tier::Structural));
        }

        if !s.descendants.covers(&t.descendants) || !t.ancestors.covers(&s.ancestors) {
            return Some(Resolution::new(false, Tier::Filter));
        }
        None
    }

    /// One-off query. Allocates a visitation table; use an [`Oracle`] for batches.
    pub fn reach(&self, source: usize, target: usize) -> bool {
        Oracle::new(self).reach(source, target)
    }

    /// Answer by plain forward search, ignoring every label.
    pub fn reach_by_search(&self, source: usize, target: usize) -> bool {
        Oracle::new(self).reach_exhaustive(source, target)
    }
}

/// A query session over a shared index.
///
/// Owns the only mutable query state: the visitation table and the search stack. Give
/// each thread its own `Oracle`.
#[derive(Debug, Clone)]
pub struct Oracle<'a, const K: usize = DEFAULT_WORDS> {
    index: &'a ReachIndex<K>,
    visited: VisitStamps,
    stack: Vec<usize>,
}

impl<'a, const K: usize> Oracle<'a, K> {
    pub fn new(index: &'a ReachIndex<K>) -> Self {
        Self { index, visited: VisitStamps::new(index.node_count()), stack: Vec::new() }
    }

    pub fn index(&self) -> &'a ReachIndex<K> {
        self.index
    }

    pub fn reach(&mut self, source: usize, target: usize) -> bool {
        self.resolve(source, target).reachable
    }

    pub fn resolve(&mut self, source: usize, target: usize) -> Resolution {
        match self.index.shortcut(source, target) {
            Some(resolution) => resolution,
            None => Resolution::new(self.search(source, target), Tier::Search),
        }
    }

    fn search(&mut self, source: usize, target: usize) -> bool {
        let index = self.index;
        self.visited.advance();
        self.stack.clear();
        self.visited.visit(source);
        self.push_successors(source);

        while let Some(node) = self.stack.pop() {
            match index.shortcut(node, target) {
                Some(r) if r.reachable => return true,
                Some(_) => {}
                None => self.push_successors(node),
            }
        }
        false
    }

    /// Forward depth-first search with no label shortcuts.
    pub fn reach_exhaustive(&mut self, source: usize, target: usize) -> bool {
        if source == target {
            return true;
        }
        self.visited.advance();
        self.stack.clear();
        self.visited.visit(source);
        self.push_successors(source);

        while let Some(node) = self.stack.pop() {
            if node == target {
                return true;
            }
            self.push_successors(node);
        }
        false
    }

    fn push_successors(&mut self, node: usize) {
        let index = self.index;
        // Reversed so the first successor is explored first.
        for &next in index.successors_ref(node).iter().rev() {
            if self.visited.visit(next) {
                self.stack.push(next);
            }
        }
    }
}
