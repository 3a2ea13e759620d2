//! Database connection management.
//!
//! Wraps an `SQLx` SQLite pool with the connect options the rest of the
//! crate relies on (auto-create, single-writer-friendly pool size).

use crate::error::{DatabaseError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// SQLite connection pool for the plugin record database.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: Pool<Sqlite>,
}

impl DbPool {
    /// Open (creating if missing) the database at `path`.
    ///
    /// The pool is capped at one connection: SQLite is single-writer and
    /// an in-memory database would otherwise be one-per-connection.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Open(format!("failed to open pool: {e}")))?;

        tracing::info!(path = %path.as_ref().display(), "database pool opened");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close the connection pool gracefully.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
