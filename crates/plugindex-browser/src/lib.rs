//! Headless browser page sessions.
//!
//! SpigotMC and CurseForge listings only expose their metadata through
//! rendered HTML, so those extractors drive a real browser. Each extraction
//! opens its own [`PageSession`] and tears it down on every exit path —
//! sessions are never shared between extractors or between concurrent
//! fetches, trading throughput for isolation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod session;

pub use error::{BrowserError, Result};
pub use session::{PageSession, SessionOptions};
