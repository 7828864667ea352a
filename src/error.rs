//! Error types for the pointer graph and the textual IR front end.
use thiserror::Error;

/// Internal invariants of the [`crate::engine::PointerGraph`] that the
/// interpreter (C2) must never violate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node is already a reference and cannot be transformed again")]
    AlreadyReference,
}

/// Errors raised while building or loading the textual IR (§6/D4).
#[derive(Debug, Error)]
pub enum IrError {
    #[error("unknown block label '{0}' referenced by a branch")]
    UnknownBlock(String),

    #[error("function '{0}' has no entry block")]
    NoEntryBlock(String),

    #[error("malformed IR at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
