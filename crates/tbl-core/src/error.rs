use crate::entry::EntryId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a roll table.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entry ID does not exist in the table.
    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),
}
