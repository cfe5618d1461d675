//! Error types for record store operations.

use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a record store can report.
///
/// The conversion engine never propagates these: each one is folded into the
/// batch report as an error string or a diagnostic warning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The destination compendium does not exist.
    #[error("destination not found: {0}")]
    DestinationNotFound(String),

    /// The destination compendium is locked against writes.
    #[error("destination is locked: {0}")]
    Locked(String),

    /// The store refused the operation.
    #[error("operation rejected: {0}")]
    Rejected(String),

    /// The store failed to perform I/O.
    #[error("i/o error: {0}")]
    Io(String),
}
