//! The aggregator: one URL in, one assembled plugin record out.

use crate::author::fetch_author;
use crate::context::FetchContext;
use crate::description::fetch_description;
use crate::error::{ExtractResult, FetchError};
use crate::icon::fetch_icon;
use crate::title::fetch_title;
use crate::versions::fetch_versions;
use plugindex_core::{resolve, AppConfig, PluginRecord, RecordStore};

/// The five independently fetched attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Plugin title.
    Title,
    /// Short description.
    Description,
    /// Author name(s).
    Author,
    /// Normalized icon URL.
    Icon,
    /// Supported game versions.
    Versions,
}

impl Attribute {
    /// All attributes in record-field order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Author,
        Self::Icon,
        Self::Versions,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Author => "author",
            Self::Icon => "icon",
            Self::Versions => "versions",
        }
    }
}

/// Fetches plugin metadata for listing URLs.
///
/// Resolves each URL exactly once and runs all five extractors against the
/// same `(platform, identifier)` pair. A missed attribute becomes an empty
/// field; the only record-level failure is an unresolvable URL.
pub struct Fetcher {
    ctx: FetchContext,
}

impl Fetcher {
    /// Build a fetcher against the production platform APIs.
    pub fn new(config: &AppConfig) -> ExtractResult<Self> {
        Ok(Self {
            ctx: FetchContext::new(config)?,
        })
    }

    /// Build a fetcher over a pre-assembled context (tests).
    #[must_use]
    pub fn with_context(ctx: FetchContext) -> Self {
        Self { ctx }
    }

    /// Fetch every attribute and assemble the record.
    ///
    /// `owner` is left unset — extraction never produces ownership.
    pub async fn fetch_plugin(&self, url: &str) -> Result<PluginRecord, FetchError> {
        let source = resolve(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        tracing::info!(
            platform = %source.platform,
            identifier = %source.identifier,
            "fetching plugin metadata"
        );

        let mut record = PluginRecord::new(url);
        record.title = fetch_title(&self.ctx, &source).await.unwrap_or_default();
        record.description = fetch_description(&self.ctx, &source)
            .await
            .unwrap_or_default();
        record.author = fetch_author(&self.ctx, &source).await.unwrap_or_default();
        record.icon_url = fetch_icon(&self.ctx, &source).await.unwrap_or_default();
        record.versions = fetch_versions(&self.ctx, &source).await.unwrap_or_default();

        Ok(record)
    }

    /// Fetch a single attribute, rendered as text (versions space-joined).
    ///
    /// `Ok(None)` means the URL resolved but the attribute could not be
    /// obtained — distinct from the `InvalidUrl` error.
    pub async fn fetch_attribute(
        &self,
        url: &str,
        attribute: Attribute,
    ) -> Result<Option<String>, FetchError> {
        let source = resolve(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        Ok(match attribute {
            Attribute::Title => fetch_title(&self.ctx, &source).await,
            Attribute::Description => fetch_description(&self.ctx, &source).await,
            Attribute::Author => fetch_author(&self.ctx, &source).await,
            Attribute::Icon => fetch_icon(&self.ctx, &source).await,
            Attribute::Versions => fetch_versions(&self.ctx, &source)
                .await
                .map(|v| v.join_spaced()),
        })
    }

    /// Persist a fetched record after explicit confirmation.
    ///
    /// Replace-by-url: any stored record with the same URL is removed as
    /// part of the same store operation.
    pub async fn confirm(
        &self,
        record: PluginRecord,
        store: &dyn RecordStore,
    ) -> Result<(), FetchError> {
        tracing::info!(url = %record.url, "persisting confirmed record");
        store.upsert(record).await?;
        Ok(())
    }
}
