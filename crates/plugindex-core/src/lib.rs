//! Core types for plugindex.
//!
//! This crate defines the shared domain model (platforms, resolved sources,
//! plugin records, version sets), the pure URL resolver, the persistence
//! seam used by the extraction engine, and application configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod resolve;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, ConfigResult, StoreError, StoreResult};
pub use resolve::resolve;
pub use store::{MemoryStore, RecordStore};
pub use types::{Platform, PluginRecord, ResolvedSource, VersionSet};
