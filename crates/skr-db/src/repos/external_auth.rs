//! External-auth link repository. Insert-only: a link is never updated in
//! place, only deleted and re-created.

use chrono::Utc;

use skr_core::entities::{ExternalAuthKey, ExternalAuthLink};

use crate::SkrDb;
use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::repos::PREFIX_EXTERNAL_AUTH;

const LINK_COLUMNS: &str = "id, collection_id, record_id, provider, provider_id, created, updated";

fn row_to_link(row: &libsql::Row) -> Result<ExternalAuthLink, DatabaseError> {
    Ok(ExternalAuthLink {
        id: row.get::<String>(0)?,
        collection_id: row.get::<String>(1)?,
        record_id: row.get::<String>(2)?,
        provider: row.get::<String>(3)?,
        provider_id: row.get::<String>(4)?,
        created: parse_datetime(&row.get::<String>(5)?)?,
        updated: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl SkrDb {
    pub async fn get_external_auth(
        &self,
        key: &ExternalAuthKey,
    ) -> Result<Option<ExternalAuthLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM external_auths
                     WHERE collection_id = ?1 AND record_id = ?2 AND provider = ?3"
                ),
                libsql::params![
                    key.collection_id.as_str(),
                    key.record_id.as_str(),
                    key.provider.as_str()
                ],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_link(&row)?)),
            None => Ok(None),
        }
    }

    /// Find the link a provider user id is bound to within a collection.
    pub async fn get_external_auth_by_provider_id(
        &self,
        collection_id: &str,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<ExternalAuthLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM external_auths
                     WHERE collection_id = ?1 AND provider = ?2 AND provider_id = ?3"
                ),
                libsql::params![collection_id, provider, provider_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_link(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a link by id. Deleting a link that is already gone is not an
    /// error.
    pub async fn remove_external_auth(&self, link: &ExternalAuthLink) -> Result<(), DatabaseError> {
        let removed = self
            .conn()
            .execute("DELETE FROM external_auths WHERE id = ?1", [link.id.as_str()])
            .await?;
        tracing::debug!(id = %link.id, provider = %link.provider, removed, "external auth deleted");
        Ok(())
    }

    /// Insert a new link. Fails if the key or the provider id is already
    /// linked, or if the account does not exist.
    pub async fn create_external_auth(
        &self,
        key: &ExternalAuthKey,
        provider_id: &str,
    ) -> Result<ExternalAuthLink, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_EXTERNAL_AUTH).await?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO external_auths ({LINK_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params![
                    id.as_str(),
                    key.collection_id.as_str(),
                    key.record_id.as_str(),
                    key.provider.as_str(),
                    provider_id,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(%id, provider = %key.provider, record = %key.record_id, "external auth inserted");

        Ok(ExternalAuthLink {
            id,
            collection_id: key.collection_id.clone(),
            record_id: key.record_id.clone(),
            provider: key.provider.clone(),
            provider_id: provider_id.to_string(),
            created: now,
            updated: now,
        })
    }

    /// All links of one account, across providers.
    pub async fn list_external_auths(
        &self,
        collection_id: &str,
        record_id: &str,
    ) -> Result<Vec<ExternalAuthLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM external_auths
                     WHERE collection_id = ?1 AND record_id = ?2 ORDER BY provider"
                ),
                libsql::params![collection_id, record_id],
            )
            .await?;

        let mut links = Vec::new();
        while let Some(row) = rows.next().await? {
            links.push(row_to_link(&row)?);
        }
        Ok(links)
    }
}
