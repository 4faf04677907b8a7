use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The auth collection a sign-in targets (e.g. `users`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthCollection {
    pub id: String,
    pub name: String,
}

impl AuthCollection {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
