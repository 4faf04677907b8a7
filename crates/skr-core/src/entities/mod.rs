//! Persisted entities.
//!
//! Each entity maps to a table owned by the storage backend (`skr-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod account;
mod collection;
mod external_auth;

pub use account::AccountRecord;
pub use collection::AuthCollection;
pub use external_auth::{ExternalAuthKey, ExternalAuthLink};
