//! The periodic refresh loop.
//!
//! Each pass re-fetches every stored record and replaces it wholesale,
//! carrying the previous owner forward. A record whose fetch fails keeps
//! its previous contents; a pass that fails outright (the store itself is
//! unavailable) triggers a shorter cooldown sleep before the next attempt.

use crate::timing::next_refresh_timestamp;
use plugindex_core::{RecordStore, StoreError};
use plugindex_fetch::Fetcher;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Records re-fetched and written back.
    pub refreshed: usize,
    /// Records whose fetch failed and were left untouched.
    pub failed: usize,
}

/// Drives periodic re-fetching of every stored record.
pub struct RefreshDriver {
    fetcher: Arc<Fetcher>,
    store: Arc<dyn RecordStore>,
    interval: Duration,
    cooldown: Duration,
}

impl RefreshDriver {
    /// Build a driver over a fetcher and a store.
    #[must_use]
    pub fn new(
        fetcher: Arc<Fetcher>,
        store: Arc<dyn RecordStore>,
        interval: Duration,
        cooldown: Duration,
    ) -> Self {
        Self {
            fetcher,
            store,
            interval,
            cooldown,
        }
    }

    /// Run one refresh pass over every stored record.
    ///
    /// Per-record fetch failures are counted and logged but never abort
    /// the pass; only a store failure does.
    pub async fn run_pass(&self) -> Result<PassSummary, StoreError> {
        let records = self.store.list_all().await?;
        tracing::info!(count = records.len(), "refresh pass started");

        let mut summary = PassSummary::default();
        for previous in records {
            match self.fetcher.fetch_plugin(&previous.url).await {
                Ok(mut fresh) => {
                    // Ownership is bookkeeping, not page content.
                    fresh.owner = previous.owner.clone();
                    self.store.upsert(fresh).await?;
                    summary.refreshed += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %previous.url, "refresh fetch failed, keeping previous record: {e}");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            refreshed = summary.refreshed,
            failed = summary.failed,
            "refresh pass finished"
        );
        Ok(summary)
    }

    /// Run passes forever, sleeping `interval` between them.
    ///
    /// A failed pass sleeps `cooldown` instead, so a broken store is
    /// retried sooner without tight-looping.
    pub async fn run(&self) {
        loop {
            let delay = match self.run_pass().await {
                Ok(_) => {
                    tracing::debug!(
                        next_run_at = %next_refresh_timestamp(self.interval.as_secs()),
                        "refresh pass scheduled"
                    );
                    self.interval
                }
                Err(e) => {
                    tracing::error!("refresh pass failed: {e}");
                    self.cooldown
                }
            };
            tokio::time::sleep(delay).await;
        }
    }
}
