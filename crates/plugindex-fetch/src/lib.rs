//! Attribute extraction and aggregation for plugin listings.
//!
//! Five independent extractors (title, description, author, icon, versions)
//! each dispatch on the resolved platform to a platform-specific retrieval
//! routine: a JSON API call for Modrinth and Hangar, a headless-browser
//! page session with a static-HTML fallback for SpigotMC and CurseForge.
//! Every extractor reduces its own failures to `None`; the only record-level
//! failure the aggregator surfaces is an unresolvable URL.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod api;
pub mod author;
pub mod context;
pub mod description;
pub mod error;
pub mod icon;
pub mod page;
pub mod title;
pub mod versions;

// Re-export commonly used types
pub use aggregate::{Attribute, Fetcher};
pub use author::fetch_author;
pub use context::FetchContext;
pub use description::fetch_description;
pub use error::{ExtractError, ExtractResult, FetchError};
pub use icon::fetch_icon;
pub use title::fetch_title;
pub use versions::fetch_versions;
