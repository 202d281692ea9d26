// File: src/error.rs
//! Error types for the sampler and its collaborators.

use thiserror::Error;

/// Top-level error type for LDA sampling operations.
#[derive(Debug, Error)]
pub enum LdaError {
    /// Bad topic count, non-positive hyperparameters or an empty corpus.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A restored snapshot whose counts or shape disagree with its assignments.
    #[error("corrupt state: {0}")]
    CorruptState(String),

    /// A query referenced a document, word or topic that does not exist.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary snapshot encoding error.
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON snapshot or config error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for LDA operations.
pub type Result<T> = std::result::Result<T, LdaError>;

/// Returns `IndexOutOfRange` unless `index < len`.
pub(crate) fn check_index(kind: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(LdaError::IndexOutOfRange { kind, index, len })
    }
}
