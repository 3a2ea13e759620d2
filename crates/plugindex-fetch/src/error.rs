//! Extraction and aggregation error types.

use plugindex_core::StoreError;
use thiserror::Error;

/// Errors internal to a single attribute extraction.
///
/// These never cross the extractor boundary: the dispatching extractor logs
/// them and reduces the attribute to a miss (`None`).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP transport or status failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Browser session failure.
    #[error("browser error: {0}")]
    Browser(#[from] plugindex_browser::BrowserError),

    /// The CurseForge API key is not configured.
    #[error("curseforge api key not configured")]
    MissingApiKey,
}

/// Result type alias for extraction internals.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Record-level failures surfaced by the aggregator.
///
/// A missed attribute is not one of these — it becomes an empty field in
/// the assembled record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be classified into a known platform. Terminal:
    /// callers must not retry.
    #[error("unrecognized listing url: {0}")]
    InvalidUrl(String),

    /// Persisting the confirmed record failed; the record was not merged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display_names_the_url() {
        let err = FetchError::InvalidUrl("https://example.com/x".to_string());
        assert!(err.to_string().contains("https://example.com/x"));
    }
}
