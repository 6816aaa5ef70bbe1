//! Error type definitions.
//!
//! This module defines all error types used throughout the crate, including
//! the closed failure taxonomy recorded in submission results.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error produced by the URL normalizer.
///
/// A normalization failure never aborts a submission run; the aggregator
/// converts it into a failed result for that single URL and the remaining
/// URLs proceed normally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid URL {input:?}: {reason}")]
pub struct NormalizeError {
    /// The raw input that failed to normalize
    pub input: String,
    /// Why it was rejected
    pub reason: String,
}

/// Errors produced by the credential manager.
///
/// `Unconfigured` and `ExchangeFailed` are deliberately distinct: the first
/// means credential material is absent (the provider is skipped and not
/// counted as attempted), the second means the provider rejected a configured
/// integration (counted as an attempted failure). Both are distinct from
/// later per-URL submission failures, which lets the report explain why a
/// provider contributed zero successes.
#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    /// Credential material (private key / service identity) is not configured.
    #[error("provider credentials not configured")]
    Unconfigured,

    /// The provider rejected the credential exchange. Carries the provider's
    /// error description verbatim.
    #[error("credential exchange failed: {0}")]
    ExchangeFailed(String),
}

/// Closed taxonomy of submission failures.
///
/// Every failed [`SubmissionResult`](crate::report::SubmissionResult) carries
/// one of these, so callers can branch on the failure kind instead of parsing
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
pub enum FailureKind {
    /// The input could not be normalized into an absolute URL
    InvalidUrl,
    /// Provider credential material absent; provider skipped
    ProviderUnconfigured,
    /// Configured provider rejected the credential exchange
    CredentialExchange,
    /// HTTP-level failure of a batch or per-URL submission
    Submission,
    /// The outbound call exceeded its bounded timeout
    Timeout,
    /// The overall operation was cancelled before this call resolved
    Cancelled,
}

impl FailureKind {
    /// Returns a human-readable string representation of the failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidUrl => "invalid URL",
            FailureKind::ProviderUnconfigured => "provider unconfigured",
            FailureKind::CredentialExchange => "credential exchange failed",
            FailureKind::Submission => "submission failed",
            FailureKind::Timeout => "submission timed out",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_kind_as_str() {
        assert_eq!(FailureKind::InvalidUrl.as_str(), "invalid URL");
        assert_eq!(
            FailureKind::CredentialExchange.as_str(),
            "credential exchange failed"
        );
        assert_eq!(FailureKind::Timeout.as_str(), "submission timed out");
    }

    #[test]
    fn test_all_failure_kinds_have_string_representation() {
        for kind in FailureKind::iter() {
            assert!(
                !kind.as_str().is_empty(),
                "{:?} should have non-empty string",
                kind
            );
        }
    }

    #[test]
    fn test_credential_error_distinction() {
        // Unconfigured and ExchangeFailed must stay distinguishable for the
        // aggregator's skip-vs-failure decision.
        let unconfigured = CredentialError::Unconfigured;
        let rejected = CredentialError::ExchangeFailed("invalid_grant".to_string());
        assert!(matches!(unconfigured, CredentialError::Unconfigured));
        assert!(matches!(rejected, CredentialError::ExchangeFailed(_)));
    }

    #[test]
    fn test_exchange_failed_preserves_provider_message() {
        let err = CredentialError::ExchangeFailed("Invalid JWT signature.".to_string());
        assert!(err.to_string().contains("Invalid JWT signature."));
    }

    #[test]
    fn test_normalize_error_display() {
        let err = NormalizeError {
            input: "".to_string(),
            reason: "empty input".to_string(),
        };
        assert!(err.to_string().contains("empty input"));
    }
}
