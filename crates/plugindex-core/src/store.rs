//! Record persistence seam.
//!
//! The extraction engine takes a store handle rather than reaching for a
//! fixed file or table, so tests can substitute the in-memory
//! implementation. The engine itself only ever calls `upsert` (via the
//! aggregator's confirm step); owner and role bookkeeping belong to the
//! store's other callers.

use crate::error::{StoreError, StoreResult};
use crate::types::PluginRecord;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Persistence surface for plugin records, keyed by listing URL.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All stored records.
    async fn list_all(&self) -> StoreResult<Vec<PluginRecord>>;

    /// Records whose `owner` equals the given user.
    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<PluginRecord>>;

    /// Replace-by-url: after return the store holds exactly one record with
    /// this URL, carrying the new record's fields. The replace must be
    /// atomic — no window where both or neither version is visible.
    async fn upsert(&self, record: PluginRecord) -> StoreResult<()>;

    /// Delete the record with this URL regardless of owner.
    async fn delete_by_url(&self, url: &str) -> StoreResult<()>;

    /// Delete the record only when it belongs to the given owner.
    async fn delete_by_owner_and_url(&self, owner: &str, url: &str) -> StoreResult<()>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PluginRecord>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    #[must_use]
    pub fn with_records(records: Vec<PluginRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> StoreResult<Vec<PluginRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<PluginRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.owner.as_deref() == Some(owner))
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: PluginRecord) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        records.retain(|r| r.url != record.url);
        records.push(record);
        Ok(())
    }

    async fn delete_by_url(&self, url: &str) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.url != url);
        if records.len() == before {
            return Err(StoreError::NotFound(url.to_string()));
        }
        Ok(())
    }

    async fn delete_by_owner_and_url(&self, owner: &str, url: &str) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| !(r.url == url && r.owner.as_deref() == Some(owner)));
        if records.len() == before {
            return Err(StoreError::NotFound(url.to_string()));
        }
        Ok(())
    }
}
