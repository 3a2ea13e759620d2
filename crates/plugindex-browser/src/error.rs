use thiserror::Error;

/// Result type alias for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors raised by the browser session layer.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser process could not be launched or configured.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Navigating to the target URL failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// A DevTools protocol call failed mid-session.
    #[error("chromium error: {0}")]
    Chromium(String),

    /// A bounded wait expired.
    #[error("timeout: {0}")]
    Timeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BrowserError::Navigation("page not found".to_string());
        assert_eq!(err.to_string(), "navigation failed: page not found");

        let err = BrowserError::Timeout("h1.resource-title__name".to_string());
        assert!(err.to_string().contains("h1.resource-title__name"));
    }
}
