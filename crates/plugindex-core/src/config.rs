//! Configuration management for plugindex.
//!
//! TOML-based configuration with XDG-compliant paths and environment
//! variable overrides. Missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// Loaded from `~/.config/plugindex/config.toml` (or platform equivalent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Plain HTTP client settings
    pub http: HttpConfig,
    /// Headless browser settings
    pub browser: BrowserConfig,
    /// Periodic refresh settings
    pub refresh: RefreshConfig,
    /// Persistence settings
    pub database: DatabaseConfig,
    /// CurseForge API access
    pub curseforge: CurseforgeConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supported variables:
    /// - `PLUGINDEX_HEADLESS`: browser headless mode (true/false)
    /// - `PLUGINDEX_DB_PATH`: database file path
    /// - `PLUGINDEX_REFRESH_INTERVAL_SECS`: refresh interval
    /// - `CURSEFORGE_API_KEY`: CurseForge API key
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("PLUGINDEX_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("PLUGINDEX_DB_PATH") {
            config.database.path = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("PLUGINDEX_REFRESH_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                config.refresh.interval_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("CURSEFORGE_API_KEY") {
            if !val.is_empty() {
                config.curseforge.api_key = Some(val);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk, creating the config directory if needed.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Path to the configuration file.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "plugindex", "plugindex").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Data directory, the default home of the database file.
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "plugindex", "plugindex").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// The configured database path, or the default under the data dir.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join("plugindex.db"))
    }
}

/// Plain HTTP client settings used by the JSON API backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with API requests
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("plugindex/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Headless browser settings used by the DOM backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run the browser without a visible window
    pub headless: bool,
    /// Overall navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
    /// How long to wait for a primary selector before falling back
    pub selector_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_ms: 30_000,
            selector_timeout_ms: 3_000,
        }
    }
}

/// Periodic refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Interval between full refresh passes, in seconds
    pub interval_secs: u64,
    /// Shorter wait after a failed pass, in seconds
    pub cooldown_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3_600,
            cooldown_secs: 300,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path; defaults to the data directory when unset
    pub path: Option<PathBuf>,
}

/// CurseForge API access settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurseforgeConfig {
    /// API key for `api.curseforge.com`; the author extractor yields a miss
    /// when unset
    pub api_key: Option<String>,
}
