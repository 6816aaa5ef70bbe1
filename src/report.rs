//! Submission results and the aggregate indexing report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

use crate::error_handling::FailureKind;

/// Identifies the component that produced a submission result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
pub enum Provider {
    /// URL normalization (failed inputs only; never performs network calls)
    Normalizer,
    /// Bulk-notification provider (IndexNow protocol)
    IndexNow,
    /// Signed-auth per-URL provider (Google Indexing API style)
    GoogleIndexing,
}

impl Provider {
    /// Returns a human-readable string representation of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Normalizer => "normalization",
            Provider::IndexNow => "indexnow",
            Provider::GoogleIndexing => "google-indexing",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outcome per (provider, target) pair. Immutable once produced.
///
/// `target` is the endpoint for bulk calls, the submitted URL for per-URL
/// calls, and the raw input for normalization failures. `urls` lists every
/// URL the call covered, so a bulk result for a batch of 500 URLs is still
/// one result.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    /// Component that produced this result
    pub provider: Provider,
    /// Endpoint or URL this result refers to
    pub target: String,
    /// URLs covered by this call
    pub urls: Vec<String>,
    /// Whether the provider accepted the submission
    pub success: bool,
    /// HTTP status code, when a response was received
    pub status: Option<u16>,
    /// Captured error detail (response body, error description, or message)
    pub message: Option<String>,
    /// Failure classification; `None` on success
    pub failure: Option<FailureKind>,
}

impl SubmissionResult {
    /// Creates a successful result.
    pub fn accepted(provider: Provider, target: impl Into<String>, urls: Vec<String>, status: u16) -> Self {
        Self {
            provider,
            target: target.into(),
            urls,
            success: true,
            status: Some(status),
            message: None,
            failure: None,
        }
    }

    /// Creates a failed result.
    pub fn failed(
        provider: Provider,
        target: impl Into<String>,
        urls: Vec<String>,
        kind: FailureKind,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            target: target.into(),
            urls,
            success: false,
            status,
            message: Some(message.into()),
            failure: Some(kind),
        }
    }

    /// Creates a result for work that was still outstanding when the
    /// operation was cancelled.
    pub fn cancelled(provider: Provider, target: impl Into<String>, urls: Vec<String>) -> Self {
        Self::failed(
            provider,
            target,
            urls,
            FailureKind::Cancelled,
            None,
            "operation cancelled before this call resolved",
        )
    }
}

/// A provider that contributed zero results because it was not configured.
///
/// Skipped providers are not counted as attempted, so a site that never set
/// up one provider does not accumulate misleading failure counts.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSkip {
    /// The skipped provider
    pub provider: Provider,
    /// Taxonomy classification of the skip
    pub kind: FailureKind,
    /// Why it was skipped
    pub reason: String,
}

impl ProviderSkip {
    /// Creates a skip record for a provider whose credential material is
    /// absent.
    pub fn unconfigured(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            kind: FailureKind::ProviderUnconfigured,
            reason: reason.into(),
        }
    }
}

/// Advisory metadata about static discovery surfaces.
///
/// Produced by the passive advisory checker from configuration alone (no
/// network calls). Informational only: it never changes `overall_success`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdvisoryStatus {
    /// Crawl policy file allows the expected crawlers
    pub robots_policy_ok: bool,
    /// Sitemap carries a current freshness marker
    pub sitemap_current: bool,
    /// Syndication feed is available
    pub feed_available: bool,
    /// Internal-link health marker is set
    pub internal_links_ok: bool,
}

/// Summary counts over all submission results.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    /// Calls attempted (normalization failures included, skips excluded)
    pub attempted: usize,
    /// Calls the provider accepted
    pub succeeded: usize,
    /// Calls that failed
    pub failed: usize,
    /// Providers skipped because they were not configured
    pub providers_skipped: usize,
}

/// The aggregate report returned to the caller of `submit()`.
///
/// `overall_success` is true iff at least one submission result succeeded:
/// a single working provider is sufficient, and a misconfigured or down
/// provider never sinks the whole operation.
#[derive(Debug, Clone, Serialize)]
pub struct IndexingReport {
    /// Whether at least one provider accepted at least one submission
    pub overall_success: bool,
    /// Every per-call outcome, across all providers
    pub results: Vec<SubmissionResult>,
    /// Providers skipped because they were not configured
    pub skipped: Vec<ProviderSkip>,
    /// Advisory discovery-surface metadata
    pub advisory: AdvisoryStatus,
    /// Summary counts
    pub summary: Summary,
    /// When this report was produced
    pub generated_at: DateTime<Utc>,
}

impl IndexingReport {
    /// Assembles a report from collected results, computing the summary and
    /// the overall-success invariant.
    pub fn from_parts(
        results: Vec<SubmissionResult>,
        skipped: Vec<ProviderSkip>,
        advisory: AdvisoryStatus,
    ) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed = results.len() - succeeded;
        let summary = Summary {
            attempted: results.len(),
            succeeded,
            failed,
            providers_skipped: skipped.len(),
        };
        Self {
            overall_success: succeeded > 0,
            results,
            skipped,
            advisory,
            summary,
            generated_at: Utc::now(),
        }
    }
}
