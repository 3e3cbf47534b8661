//! Error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed graph or query input, rejected before it reaches the index.
    #[error("line {line}: {reason}")]
    Load { line: usize, reason: String },

    /// A query's expected answer disagrees with the computed one.
    #[error(
        "integrity violation at query {query}: {source_node} -> {target_node} expected {expected}, computed {computed}"
    )]
    IntegrityViolation {
        query: usize,
        source_node: usize,
        target_node: usize,
        expected: bool,
        computed: bool,
    },
}

impl Error {
    pub(crate) fn load(line: usize, reason: impl Into<String>) -> Self {
        Error::Load { line, reason: reason.into() }
    }

    /// Whether this error means the index gave a wrong answer.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Error::IntegrityViolation { .. })
    }
}
