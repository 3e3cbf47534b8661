//! Batched pseudo-random scalars for label bits.
//!
//! A stream hands out the same scalar for `batch` consecutive calls before drawing a new
//! one. Batching correlates the bits chosen for nodes labelled close together in a pass;
//! the batch size is a false-positive tuning knob, so keep it exact.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct HashStream {
    rng: ChaCha8Rng,
    batch: usize,
    calls: usize,
    cached: u32,
}

impl HashStream {
    /// The first scalar is drawn here, so it is shared by the first `batch` calls.
    pub fn new(batch: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cached = rng.random();
        Self { rng, batch, calls: 0, cached }
    }

    pub fn next_raw(&mut self) -> u32 {
        if self.calls >= self.batch {
            self.calls = 0;
            self.cached = self.rng.random();
        }
        self.calls += 1;
        self.cached
    }
}
