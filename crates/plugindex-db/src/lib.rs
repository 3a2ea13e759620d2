//! SQLite persistence for plugin metadata records.
//!
//! Uses `SQLx` with embedded migrations. One table, one row per listing
//! URL; the version set is serialized into a JSON text column. The crate
//! exposes both the low-level query functions and a [`Database`] handle
//! that implements the shared [`RecordStore`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod connection;
pub mod error;
pub mod migrations;
pub mod records;

// Re-export commonly used types
pub use connection::DbPool;
pub use error::{DatabaseError, Result};

use async_trait::async_trait;
use plugindex_core::{PluginRecord, RecordStore, StoreError, StoreResult};
use std::path::Path;

/// High-level database handle with migrations applied on open.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open the database at `path` and bring the schema up to date.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pool = DbPool::open(path).await?;
        migrations::run_migrations(pool.pool()).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        self.pool.pool()
    }

    /// Close the database connection gracefully.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn to_store_error(e: DatabaseError) -> StoreError {
    match e {
        DatabaseError::NotFound(msg) => StoreError::NotFound(msg),
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl RecordStore for Database {
    async fn list_all(&self) -> StoreResult<Vec<PluginRecord>> {
        records::list_all(self.pool()).await.map_err(to_store_error)
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<PluginRecord>> {
        records::list_by_owner(self.pool(), owner)
            .await
            .map_err(to_store_error)
    }

    async fn upsert(&self, record: PluginRecord) -> StoreResult<()> {
        records::upsert(self.pool(), &record)
            .await
            .map_err(to_store_error)
    }

    async fn delete_by_url(&self, url: &str) -> StoreResult<()> {
        records::delete_by_url(self.pool(), url)
            .await
            .map_err(to_store_error)
    }

    async fn delete_by_owner_and_url(&self, owner: &str, url: &str) -> StoreResult<()> {
        records::delete_by_owner_and_url(self.pool(), owner, url)
            .await
            .map_err(to_store_error)
    }
}
