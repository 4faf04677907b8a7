//! Account repository.

use chrono::Utc;

use skr_core::entities::AccountRecord;

use crate::SkrDb;
use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};

const ACCOUNT_COLUMNS: &str =
    "id, collection_id, email, username, token_key, verified, name, avatar_url, created, updated";

fn row_to_account(row: &libsql::Row) -> Result<AccountRecord, DatabaseError> {
    let mut record = AccountRecord::new(row.get::<String>(1)?);
    record.id = row.get::<String>(0)?;
    record.email = row.get::<String>(2)?;
    record.username = row.get::<String>(3)?;
    record.token_key = row.get::<String>(4)?;
    record.verified = get_flag(row, 5)?;
    record.name = row.get::<String>(6)?;
    record.avatar_url = row.get::<String>(7)?;
    record.created = parse_datetime(&row.get::<String>(8)?)?;
    record.updated = parse_datetime(&row.get::<String>(9)?)?;
    record.mark_stored();
    Ok(record)
}

impl SkrDb {
    /// Look up an account by collection and id. `Ok(None)` when absent.
    pub async fn get_account(
        &self,
        collection_id: &str,
        id: &str,
    ) -> Result<Option<AccountRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE collection_id = ?1 AND id = ?2"
                ),
                libsql::params![collection_id, id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert or update `record` depending on [`AccountRecord::is_new`].
    ///
    /// `created` is written only on insert. Updating a row that no longer
    /// exists returns `DatabaseError::NoResult`.
    pub async fn write_account(&self, record: &mut AccountRecord) -> Result<(), DatabaseError> {
        let now = Utc::now();

        if record.is_new() {
            self.conn()
                .execute(
                    &format!(
                        "INSERT INTO accounts ({ACCOUNT_COLUMNS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                    ),
                    libsql::params![
                        record.id.as_str(),
                        record.collection_id.as_str(),
                        record.email.as_str(),
                        record.username.as_str(),
                        record.token_key.as_str(),
                        i64::from(record.verified),
                        record.name.as_str(),
                        record.avatar_url.as_str(),
                        record.created.to_rfc3339(),
                        now.to_rfc3339()
                    ],
                )
                .await?;
            tracing::debug!(id = %record.id, collection = %record.collection_id, "account inserted");
        } else {
            let changed = self
                .conn()
                .execute(
                    "UPDATE accounts SET email = ?1, username = ?2, token_key = ?3, verified = ?4,
                     name = ?5, avatar_url = ?6, updated = ?7
                     WHERE collection_id = ?8 AND id = ?9",
                    libsql::params![
                        record.email.as_str(),
                        record.username.as_str(),
                        record.token_key.as_str(),
                        i64::from(record.verified),
                        record.name.as_str(),
                        record.avatar_url.as_str(),
                        now.to_rfc3339(),
                        record.collection_id.as_str(),
                        record.id.as_str()
                    ],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            tracing::debug!(id = %record.id, collection = %record.collection_id, "account updated");
        }

        record.updated = now;
        record.mark_stored();
        Ok(())
    }

    /// All accounts of a collection, oldest first.
    pub async fn list_accounts(
        &self,
        collection_id: &str,
    ) -> Result<Vec<AccountRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE collection_id = ?1
                     ORDER BY created, id"
                ),
                [collection_id],
            )
            .await?;

        let mut accounts = Vec::new();
        while let Some(row) = rows.next().await? {
            accounts.push(row_to_account(&row)?);
        }
        Ok(accounts)
    }
}
