//! Storage collaborator interface.
//!
//! The hook never talks to a database directly. Backends implement these two
//! traits; "no matching row" is reported as `Ok(None)`, so callers never need
//! to inspect error text to tell a miss from a failure.

use std::future::Future;

use skr_core::entities::{AccountRecord, ExternalAuthKey, ExternalAuthLink};
use skr_core::errors::StoreError;

/// Account records of auth collections.
pub trait AccountStore: Send + Sync {
    /// Fetch the record with primary key `id` in `collection_id`.
    fn find_account(
        &self,
        collection_id: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<AccountRecord>, StoreError>> + Send;

    /// Insert the record if [`AccountRecord::is_new`], update it otherwise.
    ///
    /// On success the record is marked stored and its `updated` timestamp
    /// reflects the write.
    fn save_account(
        &self,
        record: &mut AccountRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// External-auth links. The backing relation is insert-only: there is no
/// upsert, so a second insert for the same key fails or duplicates.
pub trait ExternalAuthStore: Send + Sync {
    fn find_external_auth(
        &self,
        key: &ExternalAuthKey,
    ) -> impl Future<Output = Result<Option<ExternalAuthLink>, StoreError>> + Send;

    fn delete_external_auth(
        &self,
        link: &ExternalAuthLink,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The framework's own post-hook step: record that `key.record_id` signs
    /// in through `key.provider` as `provider_id`.
    fn insert_external_auth(
        &self,
        key: &ExternalAuthKey,
        provider_id: &str,
    ) -> impl Future<Output = Result<ExternalAuthLink, StoreError>> + Send;
}
