//! Cross-cutting error types for skrump.
//!
//! Domain-specific errors (`SignInError`, `DatabaseError`, `ConfigError`) are
//! defined in their respective crates. `StoreError` lives here because it is
//! the contract between the sign-in hook and any storage backend.

use thiserror::Error;

/// Errors a storage collaborator can report.
///
/// "No matching row" is never an error: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed to execute an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored row could not be mapped back into an entity.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
