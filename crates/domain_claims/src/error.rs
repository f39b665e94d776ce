//! Claims domain errors

use thiserror::Error;

/// Unrecognized claim status string
#[derive(Debug, Clone, Error)]
#[error("unrecognized claim status '{0}'")]
pub struct ParseStatusError(pub String);

/// Errors surfaced by a `ClaimStore` implementation
///
/// Not-found is not an error here; reads return `Option` and deletes return
/// `bool` so that absent and soft-deleted rows stay indistinguishable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The claim number collides with an existing row, deleted or not.
    /// Callers may retry with a fresh generated number; the store never
    /// retries internally.
    #[error("claim number conflict: {0}")]
    DuplicateClaimNumber(String),

    /// The backing store cannot be reached (connection failure, pool
    /// exhaustion). Retry belongs to the transport layer, not here.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend fault (query failure, corrupt row, serialization)
    #[error("storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::DuplicateClaimNumber(_))
    }
}

impl From<ParseStatusError> for StoreError {
    fn from(err: ParseStatusError) -> Self {
        StoreError::Backend(err.to_string())
    }
}
