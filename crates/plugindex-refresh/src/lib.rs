//! Periodic background refresh of stored plugin records.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod driver;
pub mod timing;

pub use driver::{PassSummary, RefreshDriver};
pub use timing::next_refresh_timestamp;
