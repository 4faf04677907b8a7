use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user account in an auth collection, keyed by the canonical identity id.
///
/// `is_new` is not persisted: it tells the storage backend whether `save`
/// must insert or update. Records built with [`AccountRecord::new`] start new;
/// records loaded from storage (or deserialized) start stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: String,
    pub collection_id: String,
    pub email: String,
    pub username: String,
    pub token_key: String,
    pub verified: bool,
    pub name: String,
    pub avatar_url: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(skip)]
    is_new: bool,
}

impl AccountRecord {
    /// An empty, not yet persisted record in `collection_id`.
    #[must_use]
    pub fn new(collection_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            collection_id: collection_id.into(),
            email: String::new(),
            username: String::new(),
            token_key: String::new(),
            verified: false,
            name: String::new(),
            avatar_url: String::new(),
            created: now,
            updated: now,
            is_new: true,
        }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// Force the next save to insert.
    pub const fn mark_new(&mut self) {
        self.is_new = true;
    }

    /// Record that this row now exists in storage.
    pub const fn mark_stored(&mut self) {
        self.is_new = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_unsaved_and_unverified() {
        let record = AccountRecord::new("_pb_users_auth_");
        assert!(record.is_new());
        assert!(!record.verified);
        assert!(record.id.is_empty());
        assert_eq!(record.collection_id, "_pb_users_auth_");
        assert_eq!(record.created, record.updated);
    }

    #[test]
    fn deserialized_record_counts_as_stored() {
        let mut record = AccountRecord::new("users");
        record.id = "42".into();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("is_new"));

        let loaded: AccountRecord = serde_json::from_str(&json).unwrap();
        assert!(!loaded.is_new());
    }

    #[test]
    fn mark_new_and_stored_toggle() {
        let mut record = AccountRecord::new("users");
        record.mark_stored();
        assert!(!record.is_new());
        record.mark_new();
        assert!(record.is_new());
    }
}
