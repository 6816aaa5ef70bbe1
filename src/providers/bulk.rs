//! Bulk-notification submitter (IndexNow protocol).

use log::{debug, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::IndexNowConfig;
use crate::error_handling::FailureKind;
use crate::report::{Provider, SubmissionResult};

/// Request body of a bulk submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: &'a str,
    url_list: &'a [String],
}

/// Submits batches of normalized URLs to every configured bulk endpoint.
///
/// Each endpoint is an independent target: the same batches go to all of
/// them, in input order per endpoint, producing one [`SubmissionResult`] per
/// (endpoint, batch). There is no retry here; retry policy belongs to the
/// caller.
pub(crate) struct BulkSubmitter<'a> {
    config: &'a IndexNowConfig,
    client: &'a reqwest::Client,
}

impl<'a> BulkSubmitter<'a> {
    pub(crate) fn new(config: &'a IndexNowConfig, client: &'a reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Issues one HTTP call per (endpoint, batch) and collects every outcome.
    ///
    /// A failed batch never aborts the rest: subsequent batches and endpoints
    /// are still attempted. If `cancel` fires, outstanding pairs are recorded
    /// as `Cancelled` results and already-gathered results are kept.
    pub(crate) async fn submit(
        &self,
        host: &str,
        batches: &[Vec<String>],
        cancel: &CancellationToken,
    ) -> Vec<SubmissionResult> {
        let key_location = self
            .config
            .key_location
            .clone()
            .unwrap_or_else(|| format!("https://{host}/{}.txt", self.config.key));

        let mut results = Vec::with_capacity(self.config.endpoints.len() * batches.len());
        for endpoint in &self.config.endpoints {
            for batch in batches {
                if cancel.is_cancelled() {
                    results.push(SubmissionResult::cancelled(
                        Provider::IndexNow,
                        endpoint.clone(),
                        batch.clone(),
                    ));
                    continue;
                }
                results.push(
                    self.submit_batch(host, endpoint, &key_location, batch, cancel)
                        .await,
                );
            }
        }
        results
    }

    async fn submit_batch(
        &self,
        host: &str,
        endpoint: &str,
        key_location: &str,
        batch: &[String],
        cancel: &CancellationToken,
    ) -> SubmissionResult {
        let payload = BulkPayload {
            host,
            key: &self.config.key,
            key_location,
            url_list: batch,
        };

        let request = self.client.post(endpoint).json(&payload).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => {
                return SubmissionResult::cancelled(
                    Provider::IndexNow,
                    endpoint,
                    batch.to_vec(),
                );
            }
            response = request => response,
        };

        match response {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    debug!(
                        "Bulk endpoint {endpoint} accepted {} URL(s) (HTTP {})",
                        batch.len(),
                        status.as_u16()
                    );
                    SubmissionResult::accepted(
                        Provider::IndexNow,
                        endpoint,
                        batch.to_vec(),
                        status.as_u16(),
                    )
                } else {
                    let body = response.text().await.unwrap_or_default();
                    warn!(
                        "Bulk endpoint {endpoint} rejected batch of {} URL(s): HTTP {}",
                        batch.len(),
                        status.as_u16()
                    );
                    SubmissionResult::failed(
                        Provider::IndexNow,
                        endpoint,
                        batch.to_vec(),
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
                warn!("Bulk endpoint {endpoint} unreachable: {e}");
                SubmissionResult::failed(
                    Provider::IndexNow,
                    endpoint,
                    batch.to_vec(),
                    kind,
                    None,
                    e.to_string(),
                )
            }
        }
    }
}
