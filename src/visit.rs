//! Epoch-stamped visitation table.
//!
//! A node counts as visited iff its stamp equals the current epoch, so starting a new
//! traversal is `O(1)` instead of a reset sweep.

#[derive(Debug, Clone)]
pub struct VisitStamps {
    stamps: Vec<u32>,
    epoch: u32,
}

impl VisitStamps {
    pub fn new(node_count: usize) -> Self {
        Self { stamps: vec![0; node_count], epoch: 0 }
    }

    /// Start a new traversal. Everything becomes unvisited.
    pub fn advance(&mut self) -> u32 {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            // Stale stamps could alias the restarted numbering.
            self.stamps.fill(0);
            self.epoch = 1;
        }
        self.epoch
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.stamps[node] == self.epoch
    }

    /// Mark `node`; returns `false` if it was already visited in this epoch.
    pub fn visit(&mut self, node: usize) -> bool {
        if self.stamps[node] == self.epoch {
            return false;
        }
        self.stamps[node] = self.epoch;
        true
    }
}
