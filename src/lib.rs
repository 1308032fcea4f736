//! # flexkids-dl
//!
//! Downloads every photo from a Flexkids parent portal account.
//!
//! A run logs in once, lists the months that have an album, resolves each
//! month's album into photo ids and downloads the photos into
//! `<output_dir>/<year>-<MM>/<photo_id>.jpg`. Album lookups and photo
//! downloads run in two concurrent worker pools connected by unbounded
//! queues; the run ends when both pools have drained.
//!
//! ## Quick Start
//!
//! ```no_run
//! use flexkids_dl::{Config, Harvester};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         username: "parent@example.com".to_string(),
//!         password: "secret".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let summary = Harvester::new(config)?.run().await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Command line arguments
pub mod cli;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Page parsing
pub mod extract;
/// Logging setup
pub mod logging;
/// The harvest pipeline
pub mod pipeline;
/// Worker pools with a completion barrier
pub mod pool;
/// Portal HTTP client
pub mod portal;
/// Login and session cookie
pub mod session;
/// Output tree layout
pub mod storage;
/// Unbounded MPMC streams
pub mod stream;
/// Core types
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuthError, Error, Result, StorageError};
pub use extract::{PeriodExtractor, PhotoIdExtractor};
pub use pipeline::Harvester;
pub use portal::{HttpPortal, Portal};
pub use types::{PeriodKey, PhotoRef, PipelineState, RunSummary, SessionCredential};
