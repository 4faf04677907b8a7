//! `skr-auth` store traits backed by libSQL.

use skr_auth::{AccountStore, ExternalAuthStore};
use skr_core::entities::{AccountRecord, ExternalAuthKey, ExternalAuthLink};
use skr_core::errors::StoreError;

use crate::SkrDb;

impl AccountStore for SkrDb {
    async fn find_account(
        &self,
        collection_id: &str,
        id: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self.get_account(collection_id, id).await?)
    }

    async fn save_account(&self, record: &mut AccountRecord) -> Result<(), StoreError> {
        Ok(self.write_account(record).await?)
    }
}

impl ExternalAuthStore for SkrDb {
    async fn find_external_auth(
        &self,
        key: &ExternalAuthKey,
    ) -> Result<Option<ExternalAuthLink>, StoreError> {
        Ok(self.get_external_auth(key).await?)
    }

    async fn delete_external_auth(&self, link: &ExternalAuthLink) -> Result<(), StoreError> {
        Ok(self.remove_external_auth(link).await?)
    }

    async fn insert_external_auth(
        &self,
        key: &ExternalAuthKey,
        provider_id: &str,
    ) -> Result<ExternalAuthLink, StoreError> {
        Ok(self.create_external_auth(key, provider_id).await?)
    }
}
