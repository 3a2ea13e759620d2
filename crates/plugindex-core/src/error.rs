//! Error types shared across the workspace.

use thiserror::Error;

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Reading or writing the config file failed.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized back to TOML.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A config value is out of range or malformed.
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field that failed validation.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced by a [`crate::store::RecordStore`] implementation.
///
/// The extraction engine treats any of these as a persistence failure: the
/// record is not merged and the error is surfaced to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed to execute the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// No record exists for the given key.
    #[error("no record for url: {0}")]
    NotFound(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
