//! Error taxonomy shared across the crate.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors surfaced by the index.
///
/// There is no I/O anywhere in this crate, so the taxonomy is small:
/// construction-time contract violations and structural invariant failures
/// reported by [`crate::BTree::validate`].
#[derive(Debug, Error)]
pub enum IndexError {
    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A structural invariant check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
