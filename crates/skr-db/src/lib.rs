//! # skr-db
//!
//! libSQL storage for skrump: account records of auth collections and the
//! external-auth links that tie them to OAuth2 providers.
//!
//! [`SkrDb`] implements the `skr-auth` store traits, so a sign-in hook can
//! run against it directly. Local files and `:memory:` are supported.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod store;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Owns the libSQL database and a single connection. Dropping it releases
/// both; [`SkrDb::close`] does the same with a final `PRAGMA optimize`.
pub struct SkrDb {
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SkrDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let skr_db = Self { db, conn };
        skr_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(skr_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"ext-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Shut the handle down explicitly.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the final `PRAGMA optimize` fails. The
    /// handle is released either way.
    pub async fn close(self) -> Result<(), DatabaseError> {
        let Self { db, conn } = self;
        let result = conn.execute_batch("PRAGMA optimize;").await;
        drop(conn);
        drop(db);
        tracing::debug!("database closed");
        result.map(|_| ()).map_err(DatabaseError::from)
    }
}
