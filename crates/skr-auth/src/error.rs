use skr_core::errors::StoreError;
use thiserror::Error;

/// Why a sign-in was aborted. Every variant fails the whole request; none is
/// retried.
#[derive(Debug, Error)]
pub enum SignInError {
    /// The provider payload lacks required fields or has the wrong shape.
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),

    /// A storage lookup failed for a reason other than "no such row".
    #[error("{entity} lookup failed: {source}")]
    LookupFailed {
        entity: &'static str,
        #[source]
        source: StoreError,
    },

    /// Saving or deleting a row failed.
    #[error("{entity} write failed: {source}")]
    PersistFailed {
        entity: &'static str,
        #[source]
        source: StoreError,
    },

    /// The framework handed over request data that breaks its own contract.
    #[error("invalid request context: {0}")]
    InvalidRequestContext(String),
}
