//! The aggregator: fans submissions out to every configured provider and
//! merges the outcomes into one report.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::advisory;
use crate::batch::{build_batches, BatchMode};
use crate::config::Config;
use crate::credentials::CredentialManager;
use crate::error_handling::FailureKind;
use crate::initialization::init_client;
use crate::normalize::normalize_url;
use crate::providers::{BulkSubmitter, SignedOutcome, SignedSubmitter};
use crate::report::{IndexingReport, Provider, ProviderSkip, SubmissionResult};

/// Multi-provider indexing notification service.
///
/// Owns the shared HTTP client and the credential manager for the
/// signed-auth provider. One instance can serve many submission runs; the
/// cached access token is reused across them until it nears expiry.
pub struct IndexingService {
    config: Config,
    client: Arc<reqwest::Client>,
    credentials: Arc<CredentialManager>,
}

impl IndexingService {
    /// Creates the service from a configuration.
    ///
    /// # Errors
    ///
    /// Fails if the host is empty or the HTTP client cannot be built. An
    /// unconfigured provider is not an error; it is skipped at submission
    /// time.
    pub fn new(config: Config) -> Result<Self> {
        if config.host.trim().is_empty() {
            bail!("configuration host must not be empty");
        }
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let credentials = Arc::new(CredentialManager::new(
            config.google.clone(),
            Arc::clone(&client),
        ));
        Ok(Self {
            config,
            client,
            credentials,
        })
    }

    /// Notifies every configured provider about the given URLs and returns
    /// the aggregate report.
    ///
    /// Inputs may be rooted paths (`/blog/post-a`) or absolute URLs. A URL
    /// that fails normalization is recorded as a failed result; the rest
    /// proceed. Providers run concurrently and independently: a slow or
    /// failing provider never delays or invalidates another.
    ///
    /// # Errors
    ///
    /// Only programmer errors surface here (empty host). Every
    /// external-system failure is data in the report, never an `Err` — a
    /// content-publish action must not fail because an indexing provider is
    /// down.
    pub async fn submit<S: AsRef<str>>(&self, urls: &[S]) -> Result<IndexingReport> {
        self.submit_with_cancel(urls, CancellationToken::new())
            .await
    }

    /// Like [`submit`](Self::submit), with cooperative cancellation.
    ///
    /// When `cancel` fires, in-flight calls are abandoned and recorded as
    /// `Cancelled` results; results gathered before cancellation are kept in
    /// the report.
    pub async fn submit_with_cancel<S: AsRef<str>>(
        &self,
        urls: &[S],
        cancel: CancellationToken,
    ) -> Result<IndexingReport> {
        let host = self.config.host.trim();
        if host.is_empty() {
            bail!("configuration host must not be empty");
        }

        let mut results = Vec::new();
        let mut normalized = Vec::new();
        for raw in urls {
            match normalize_url(raw.as_ref(), host) {
                Ok(url) => normalized.push(url),
                Err(e) => {
                    warn!("Excluding URL from submission: {e}");
                    results.push(SubmissionResult::failed(
                        Provider::Normalizer,
                        e.input.clone(),
                        Vec::new(),
                        FailureKind::InvalidUrl,
                        None,
                        e.reason,
                    ));
                }
            }
        }
        info!(
            "Submitting {} URL(s) to configured indexing providers",
            normalized.len()
        );

        let bulk_batches = match &self.config.indexnow {
            Some(cfg) => build_batches(&normalized, BatchMode::Bulk(cfg.max_batch_size)),
            None => Vec::new(),
        };
        let per_url_batches = build_batches(&normalized, BatchMode::PerUrl);

        let bulk_fut = async {
            match &self.config.indexnow {
                Some(cfg) => {
                    BulkSubmitter::new(cfg, &self.client)
                        .submit(host, &bulk_batches, &cancel)
                        .await
                }
                None => Vec::new(),
            }
        };
        let signed_fut = async {
            SignedSubmitter::new(self.config.google.as_ref(), &self.credentials, &self.client)
                .submit(&per_url_batches, &cancel)
                .await
        };
        // The advisory check has no dependency on network results; run it in
        // the same join.
        let advisory_fut = async { advisory::check(&self.config.advisory) };

        let (bulk_results, signed_outcome, advisory_status) =
            tokio::join!(bulk_fut, signed_fut, advisory_fut);

        let mut skipped = Vec::new();
        if self.config.indexnow.is_none() {
            info!("Bulk provider not configured; skipping");
            skipped.push(ProviderSkip::unconfigured(
                Provider::IndexNow,
                "site key not configured",
            ));
        }
        results.extend(bulk_results);
        match signed_outcome {
            SignedOutcome::Skipped(skip) => skipped.push(skip),
            SignedOutcome::Submitted(signed_results) => results.extend(signed_results),
        }

        let report = IndexingReport::from_parts(results, skipped, advisory_status);
        info!(
            "Indexing run complete: {}/{} call(s) accepted, {} provider(s) skipped",
            report.summary.succeeded, report.summary.attempted, report.summary.providers_skipped
        );
        Ok(report)
    }

    /// Submits an updated page along with the homepage, which usually links
    /// to it.
    pub async fn submit_page_update(&self, path: &str) -> Result<IndexingReport> {
        self.submit(&[path, "/"]).await
    }

    /// Submits a new or updated blog post along with the blog index page
    /// that lists it.
    pub async fn submit_blog_post(&self, slug: &str) -> Result<IndexingReport> {
        let slug = slug.trim_start_matches('/');
        self.submit(&[format!("/blog/{slug}"), "/blog".to_string()])
            .await
    }

    /// Submits the configured priority paths, useful after sweeping site
    /// updates.
    pub async fn submit_priority_urls(&self) -> Result<IndexingReport> {
        let paths = self.config.priority_paths.clone();
        self.submit(&paths).await
    }
}
