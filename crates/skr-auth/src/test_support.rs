//! In-memory storage collaborator for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use skr_core::entities::{AccountRecord, ExternalAuthKey, ExternalAuthLink};
use skr_core::errors::StoreError;

use crate::store::{AccountStore, ExternalAuthStore};

/// Which store operations should fail on the next call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub find_account: bool,
    pub save_account: bool,
    pub find_link: bool,
    pub delete_link: bool,
}

/// How many times each operation ran.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub find_account: usize,
    pub inserts: usize,
    pub updates: usize,
    pub find_link: usize,
    pub delete_link: usize,
}

/// `HashMap`-backed store mirroring the libSQL backend's insert/update rules.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<(String, String), AccountRecord>>,
    links: Mutex<Vec<ExternalAuthLink>>,
    calls: Mutex<Calls>,
    failures: Mutex<Failures>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, failures: Failures) {
        *self.failures.lock().unwrap() = failures;
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn account(&self, collection_id: &str, id: &str) -> Option<AccountRecord> {
        self.accounts
            .lock()
            .unwrap()
            .get(&(collection_id.to_string(), id.to_string()))
            .cloned()
    }

    pub fn links(&self) -> Vec<ExternalAuthLink> {
        self.links.lock().unwrap().clone()
    }

    /// Seed a link directly, bypassing the insert-only uniqueness check.
    pub fn seed_link(&self, key: &ExternalAuthKey, provider_id: &str) -> ExternalAuthLink {
        let mut links = self.links.lock().unwrap();
        let now = Utc::now();
        let link = ExternalAuthLink {
            id: format!("ext-{:08x}", links.len() + 1),
            collection_id: key.collection_id.clone(),
            record_id: key.record_id.clone(),
            provider: key.provider.clone(),
            provider_id: provider_id.to_string(),
            created: now,
            updated: now,
        };
        links.push(link.clone());
        link
    }

    fn backend_error(op: &str) -> StoreError {
        StoreError::Backend(format!("{op}: disk I/O error"))
    }
}

impl AccountStore for MemoryStore {
    async fn find_account(
        &self,
        collection_id: &str,
        id: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        self.calls.lock().unwrap().find_account += 1;
        if self.failures.lock().unwrap().find_account {
            return Err(Self::backend_error("find_account"));
        }
        Ok(self.account(collection_id, id).map(|mut record| {
            record.mark_stored();
            record
        }))
    }

    async fn save_account(&self, record: &mut AccountRecord) -> Result<(), StoreError> {
        if self.failures.lock().unwrap().save_account {
            return Err(Self::backend_error("save_account"));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let key = (record.collection_id.clone(), record.id.clone());
        let exists = accounts.contains_key(&key);
        if record.is_new() {
            if exists {
                return Err(StoreError::Backend(
                    "UNIQUE constraint failed: accounts.id".into(),
                ));
            }
            self.calls.lock().unwrap().inserts += 1;
        } else {
            if !exists {
                return Err(StoreError::Backend("no row to update".into()));
            }
            self.calls.lock().unwrap().updates += 1;
        }
        record.updated = Utc::now();
        record.mark_stored();
        accounts.insert(key, record.clone());
        Ok(())
    }
}

impl ExternalAuthStore for MemoryStore {
    async fn find_external_auth(
        &self,
        key: &ExternalAuthKey,
    ) -> Result<Option<ExternalAuthLink>, StoreError> {
        self.calls.lock().unwrap().find_link += 1;
        if self.failures.lock().unwrap().find_link {
            return Err(Self::backend_error("find_external_auth"));
        }
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.key() == *key)
            .cloned())
    }

    async fn delete_external_auth(&self, link: &ExternalAuthLink) -> Result<(), StoreError> {
        self.calls.lock().unwrap().delete_link += 1;
        if self.failures.lock().unwrap().delete_link {
            return Err(Self::backend_error("delete_external_auth"));
        }
        self.links.lock().unwrap().retain(|l| l.id != link.id);
        Ok(())
    }

    async fn insert_external_auth(
        &self,
        key: &ExternalAuthKey,
        provider_id: &str,
    ) -> Result<ExternalAuthLink, StoreError> {
        if self.links().iter().any(|link| link.key() == *key) {
            return Err(StoreError::Backend(
                "UNIQUE constraint failed: external_auths.collection_id, external_auths.record_id, external_auths.provider".into(),
            ));
        }
        Ok(self.seed_link(key, provider_id))
    }
}
