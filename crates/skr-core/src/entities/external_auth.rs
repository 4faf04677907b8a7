use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Association between an account record and the external provider it signs
/// in with. At most one row may exist per [`ExternalAuthKey`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExternalAuthLink {
    pub id: String,
    pub collection_id: String,
    pub record_id: String,
    pub provider: String,
    /// The user's id at the provider.
    pub provider_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl ExternalAuthLink {
    #[must_use]
    pub fn key(&self) -> ExternalAuthKey {
        ExternalAuthKey {
            provider: self.provider.clone(),
            collection_id: self.collection_id.clone(),
            record_id: self.record_id.clone(),
        }
    }
}

/// The (provider, collection, record) triple that identifies a link.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ExternalAuthKey {
    pub provider: String,
    pub collection_id: String,
    pub record_id: String,
}

impl ExternalAuthKey {
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        collection_id: impl Into<String>,
        record_id: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            collection_id: collection_id.into(),
            record_id: record_id.into(),
        }
    }
}
