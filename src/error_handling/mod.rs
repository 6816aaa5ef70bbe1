//! Error handling.
//!
//! This module provides:
//! - Typed errors for initialization, normalization, and credential exchange
//! - The closed [`FailureKind`] taxonomy recorded in submission results
//!
//! Propagation policy: no failure from any single provider, batch, or URL
//! escapes the aggregator as an error. Every external-system failure is
//! converted into a [`SubmissionResult`](crate::report::SubmissionResult) at
//! the point of occurrence; only programmer errors (e.g. an empty host) are
//! returned as `Err` from `submit()`.

mod types;

// Re-export public API
pub use types::{CredentialError, FailureKind, InitializationError, NormalizeError};
