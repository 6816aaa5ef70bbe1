//! Signed-auth per-URL submitter (Google Indexing API style).

use log::{debug, info, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::GoogleConfig;
use crate::credentials::CredentialManager;
use crate::error_handling::{CredentialError, FailureKind};
use crate::report::{Provider, ProviderSkip, SubmissionResult};

/// Per-URL notification body.
#[derive(Debug, Serialize)]
struct UrlNotification<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    notification_type: &'a str,
}

const URL_UPDATED: &str = "URL_UPDATED";

/// Outcome of a signed-auth submission run.
///
/// A skipped provider produced zero results and must not be counted as
/// attempted; anything else contributes per-call results to the report.
pub(crate) enum SignedOutcome {
    /// Credential material absent; the provider was never attempted.
    Skipped(ProviderSkip),
    /// The provider was attempted; one result per call made.
    Submitted(Vec<SubmissionResult>),
}

/// Submits one authenticated notification per URL.
///
/// The access token is fetched once from the [`CredentialManager`] and reused
/// across every call in the run; mid-run expiry is already covered by the
/// manager's safety margin.
pub(crate) struct SignedSubmitter<'a> {
    config: Option<&'a GoogleConfig>,
    credentials: &'a CredentialManager,
    client: &'a reqwest::Client,
}

impl<'a> SignedSubmitter<'a> {
    pub(crate) fn new(
        config: Option<&'a GoogleConfig>,
        credentials: &'a CredentialManager,
        client: &'a reqwest::Client,
    ) -> Self {
        Self {
            config,
            credentials,
            client,
        }
    }

    /// Submits every single-URL batch, never aborting early: an individual
    /// URL failure leaves subsequent URLs attempted, and cancellation records
    /// the outstanding URLs as `Cancelled`.
    pub(crate) async fn submit(
        &self,
        batches: &[Vec<String>],
        cancel: &CancellationToken,
    ) -> SignedOutcome {
        let Some(config) = self.config else {
            info!("Signed-auth provider not configured; skipping");
            return SignedOutcome::Skipped(ProviderSkip::unconfigured(
                Provider::GoogleIndexing,
                "credential material not configured",
            ));
        };

        if batches.is_empty() {
            return SignedOutcome::Submitted(Vec::new());
        }

        // The credential exchange is a network call like every other one in
        // this run: a cancelled run must not mint a fresh token.
        if cancel.is_cancelled() {
            return SignedOutcome::Submitted(Self::cancel_outstanding(batches));
        }
        let fetched = tokio::select! {
            _ = cancel.cancelled() => {
                return SignedOutcome::Submitted(Self::cancel_outstanding(batches));
            }
            fetched = self.credentials.token() => fetched,
        };

        let token = match fetched {
            Ok(token) => token,
            Err(CredentialError::Unconfigured) => {
                info!("Signed-auth provider not configured; skipping");
                return SignedOutcome::Skipped(ProviderSkip::unconfigured(
                    Provider::GoogleIndexing,
                    "credential material not configured",
                ));
            }
            Err(CredentialError::ExchangeFailed(message)) => {
                // Configured but rejected: one failed result covering the
                // whole run, so the report explains the zero successes.
                warn!("Credential exchange failed: {message}");
                let urls: Vec<String> = batches.iter().flatten().cloned().collect();
                return SignedOutcome::Submitted(vec![SubmissionResult::failed(
                    Provider::GoogleIndexing,
                    config.token_endpoint.clone(),
                    urls,
                    FailureKind::CredentialExchange,
                    None,
                    message,
                )]);
            }
        };

        let mut results = Vec::with_capacity(batches.len());
        for batch in batches {
            // Per-URL protocol: the batcher sizes every batch to one URL.
            for url in batch {
                if cancel.is_cancelled() {
                    results.push(SubmissionResult::cancelled(
                        Provider::GoogleIndexing,
                        url.clone(),
                        vec![url.clone()],
                    ));
                    continue;
                }
                results.push(self.notify_url(config, &token.value, url, cancel).await);
            }
        }
        SignedOutcome::Submitted(results)
    }

    /// One `Cancelled` result per URL that never got a call.
    fn cancel_outstanding(batches: &[Vec<String>]) -> Vec<SubmissionResult> {
        batches
            .iter()
            .flatten()
            .map(|url| {
                SubmissionResult::cancelled(
                    Provider::GoogleIndexing,
                    url.clone(),
                    vec![url.clone()],
                )
            })
            .collect()
    }

    async fn notify_url(
        &self,
        config: &GoogleConfig,
        token: &str,
        url: &str,
        cancel: &CancellationToken,
    ) -> SubmissionResult {
        let payload = UrlNotification {
            url,
            notification_type: URL_UPDATED,
        };

        let request = self
            .client
            .post(&config.submission_endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send();
        let response = tokio::select! {
            _ = cancel.cancelled() => {
                return SubmissionResult::cancelled(
                    Provider::GoogleIndexing,
                    url,
                    vec![url.to_string()],
                );
            }
            response = request => response,
        };

        match response {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    debug!("Indexing API accepted {url} (HTTP {})", status.as_u16());
                    SubmissionResult::accepted(
                        Provider::GoogleIndexing,
                        url,
                        vec![url.to_string()],
                        status.as_u16(),
                    )
                } else {
                    let body = response.text().await.unwrap_or_default();
                    warn!("Indexing API rejected {url}: HTTP {}", status.as_u16());
                    SubmissionResult::failed(
                        Provider::GoogleIndexing,
                        url,
                        vec![url.to_string()],
                        FailureKind::Submission,
                        Some(status.as_u16()),
                        format!("HTTP {}: {body}", status.as_u16()),
                    )
                }
            }
            Err(e) => {
                let kind = if e.is_timeout() {
                    FailureKind::Timeout
                } else {
                    FailureKind::Submission
                };
                warn!("Indexing API call for {url} failed: {e}");
                SubmissionResult::failed(
                    Provider::GoogleIndexing,
                    url,
                    vec![url.to_string()],
                    kind,
                    None,
                    e.to_string(),
                )
            }
        }
    }
}
