//! index_notify library: multi-provider indexing notifications
//!
//! Whenever site content changes, several independent indexing authorities
//! ("providers") want to hear about the updated URLs — each with a different
//! protocol, a different authentication model, and a different failure mode.
//! This library normalizes the URLs once, batches them per provider protocol,
//! fans the submissions out concurrently, and returns a single honest
//! [`IndexingReport`]: one working provider is enough for overall success,
//! and an unconfigured or down provider never sinks the operation.
//!
//! # Example
//!
//! ```no_run
//! use index_notify::{Config, IndexNowConfig, IndexingService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new("example.com");
//! config.indexnow = Some(IndexNowConfig::new("0123456789abcdef"));
//!
//! let service = IndexingService::new(config)?;
//! let report = service.submit(&["/blog/post-a", "/blog"]).await?;
//! println!(
//!     "{} of {} submissions accepted",
//!     report.summary.succeeded, report.summary.attempted
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod advisory;
mod batch;
pub mod config;
pub mod credentials;
mod error_handling;
pub mod initialization;
mod normalize;
mod providers;
pub mod report;
mod submit;

// Re-export public API
pub use config::{AdvisoryConfig, Config, GoogleConfig, IndexNowConfig, LogFormat, LogLevel};
pub use credentials::{AccessToken, CredentialManager};
pub use error_handling::{CredentialError, FailureKind, InitializationError, NormalizeError};
pub use report::{
    AdvisoryStatus, IndexingReport, Provider, ProviderSkip, SubmissionResult, Summary,
};
pub use submit::IndexingService;
