//! Bit-vector reachability labels.
//!
//! A label summarizes a node's reachable set (descendants or ancestors) as a `K`-word
//! bitmap. Nodes with no neighbors in the labelled direction keep a single bit position
//! instead of a full bitmap.
//!
//! Public invariant:
//! - If `a` reaches `b`, then `label(a).covers(label(b))` for descendant labels and
//!   `label(b).covers(label(a))` for ancestor labels. The converse does not hold.

use crate::config::WORD_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<const K: usize> {
    /// Bit position in `[0, K * 32)`.
    Scalar(u32),
    Vector([u32; K]),
}

impl<const K: usize> Label<K> {
    pub const BITS: u32 = (K * WORD_BITS) as u32;

    /// Evaluated wherever labels are created, so `K = 0` fails to compile instead of
    /// dividing by zero at run time.
    const NONZERO_WIDTH: () = assert!(K > 0, "labels need at least one word");

    /// Leaf label from a raw hash scalar.
    pub fn scalar_from(raw: u32) -> Self {
        let () = Self::NONZERO_WIDTH;
        Label::Scalar(raw % Self::BITS)
    }

    pub fn empty_vector() -> Self {
        let () = Self::NONZERO_WIDTH;
        Label::Vector([0; K])
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Label::Scalar(_))
    }

    /// Union this label's contribution into `words`.
    pub fn merge_into(&self, words: &mut [u32; K]) {
        match self {
            Label::Scalar(pos) => set_position(words, *pos),
            Label::Vector(other) => {
                for (w, o) in words.iter_mut().zip(other) {
                    *w |= o;
                }
            }
        }
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn covers(&self, other: &Label<K>) -> bool {
        match (self, other) {
            (Label::Vector(words), Label::Scalar(pos)) => has_position(words, *pos),
            (Label::Vector(words), Label::Vector(theirs)) => {
                words.iter().zip(theirs).all(|(w, t)| w & t == *t)
            }
            (Label::Scalar(a), Label::Scalar(b)) => a == b,
            (Label::Scalar(_), Label::Vector(_)) => false,
        }
    }

    /// Set bit positions in ascending order.
    #[cfg(test)]
    fn positions(&self) -> Vec<u32> {
        match self {
            Label::Scalar(pos) => vec![*pos],
            Label::Vector(words) => (0..Self::BITS).filter(|&p| has_position(words, p)).collect(),
        }
    }
}

/// Set the bit a raw hash scalar selects in a vector label.
///
/// Note the addressing differs from [`Label::scalar_from`]: the word is `(raw >> 5) % K`
/// and the bit is `raw & 31`.
pub fn set_hashed_bit<const K: usize>(words: &mut [u32; K], raw: u32) {
    words[(raw as usize >> 5) % K] |= 1 << (raw & 31);
}

fn set_position<const K: usize>(words: &mut [u32; K], pos: u32) {
    words[pos as usize >> 5] |= 1 << (pos & 31);
}

fn has_position<const K: usize>(words: &[u32; K], pos: u32) -> bool {
    words[pos as usize >> 5] & (1 << (pos & 31)) != 0
}
