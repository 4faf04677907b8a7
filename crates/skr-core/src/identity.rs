use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::payload::RawIdentityPayload;

/// Provider-independent user identity produced by translation.
///
/// Produced by `skr-auth`'s translator, consumed by the account reconciler and
/// attached to the sign-in event for the framework's remaining steps.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CanonicalIdentity {
    /// Decimal form of the provider's numeric account id. Doubles as the
    /// account record's primary key.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Always equal to `email`.
    pub username: String,
    pub avatar_url: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expiry: Option<DateTime<Utc>>,
    /// The untouched provider payload, kept for audit and debugging.
    pub raw_user: RawIdentityPayload,
}
