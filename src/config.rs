//! Index construction parameters.

/// Label width in 32-bit words used when no width is given (160 bits).
pub const DEFAULT_WORDS: usize = 5;

/// Bits per label word.
pub const WORD_BITS: usize = 32;

/// Default batch divisor per label word: `D = 320 * K`.
pub const DIVISOR_PER_WORD: usize = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    /// Hash batch divisor `D`. `None` means `320 * K`.
    pub batch_divisor: Option<usize>,
    /// Seed of the descendant-side hash stream; the ancestor side uses `seed + 1`.
    pub seed: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { batch_divisor: None, seed: 42 }
    }
}

impl IndexConfig {
    pub fn divisor(&self, words: usize) -> usize {
        self.batch_divisor.unwrap_or(DIVISOR_PER_WORD * words)
    }

    /// Number of consecutive hash draws that share one scalar.
    ///
    /// Zero when `node_count < D`, in which case every draw is fresh.
    pub fn batch_size(&self, node_count: usize, words: usize) -> usize {
        match self.divisor(words) {
            0 => 0,
            d => node_count / d,
        }
    }
}
