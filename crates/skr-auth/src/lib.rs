//! # skr-auth
//!
//! Hooks for the framework's "before auth with OAuth2" event that add
//! Smartsheet sign-in support.
//!
//! Smartsheet's user endpoint does not use OpenID Connect field names, so the
//! raw payload is translated into a [`CanonicalIdentity`] first. The account
//! record is then upserted by that identity's id, and any external-auth link
//! left over from a previous sign-in is deleted so the framework's own
//! insert-only link step cannot collide with it.
//!
//! Storage is abstract: anything implementing [`AccountStore`] and
//! [`ExternalAuthStore`] can back the hook (`skr-db` provides libSQL).
//!
//! [`CanonicalIdentity`]: skr_core::identity::CanonicalIdentity

pub mod error;
pub mod hook;
pub mod reconcile;
pub mod store;
pub mod translate;

#[cfg(test)]
mod test_support;

pub use error::SignInError;
pub use hook::{AuthWithOAuth2Event, PROVIDER_CONTEXT_KEY, RequestContext, SignInHook, SignInReport};
pub use reconcile::{
    Reconciliation, ReconciledAccount, reconcile_account, reconcile_external_auth_link,
    reconcile_full,
};
pub use store::{AccountStore, ExternalAuthStore};
pub use translate::SmartsheetTranslator;
