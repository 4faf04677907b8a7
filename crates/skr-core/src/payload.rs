//! Inbound OAuth2 user data as handed over by the framework.
//!
//! The framework performs the code exchange and fetches the provider's user
//! endpoint before the sign-in hook runs. What arrives here is the untouched
//! JSON body of that user endpoint plus the token bundle from the exchange.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The provider's user payload, exactly as received. Its schema is owned by
/// the provider, not by skrump.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(transparent)]
pub struct RawIdentityPayload(pub Map<String, Value>);

impl RawIdentityPayload {
    /// Wrap a JSON value. Anything other than an object yields `None`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Clone the payload into a standalone JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for RawIdentityPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Tokens obtained by the framework's OAuth2 code exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OAuth2Tokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Access token expiry. `None` when the provider did not report one.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

/// The user as seen by the sign-in hook before translation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExternalUser {
    pub raw_user: RawIdentityPayload,
    #[serde(flatten)]
    pub tokens: OAuth2Tokens,
}

impl ExternalUser {
    #[must_use]
    pub const fn new(raw_user: RawIdentityPayload, tokens: OAuth2Tokens) -> Self {
        Self { raw_user, tokens }
    }
}
