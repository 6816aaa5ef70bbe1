//! End-to-end submission scenarios against mock provider endpoints.
//!
//! These tests verify the aggregation contract: partial provider failures
//! and unconfigured providers never sink the whole operation, every failure
//! is converted into result data, and the summary counts stay honest.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use index_notify::{
    Config, FailureKind, GoogleConfig, IndexNowConfig, IndexingService, Provider,
};

const TEST_RSA_KEY: &str = include_str!("fixtures/test_service_account_key.pem");

/// Builds a config whose bulk provider points at the given mock endpoints.
fn config_with_bulk(endpoints: Vec<String>) -> Config {
    let mut config = Config::new("example.com");
    let mut indexnow = IndexNowConfig::new("test-key-0123456789");
    indexnow.endpoints = endpoints;
    config.indexnow = Some(indexnow);
    config
}

/// Points the signed-auth provider at the given mock server.
fn google_config(server: &MockServer) -> GoogleConfig {
    let mut google = GoogleConfig::new("svc@test-project.iam.gserviceaccount.com", TEST_RSA_KEY);
    google.token_endpoint = format!("{}/token", server.uri());
    google.submission_endpoint = format!("{}/publish", server.uri());
    google
}

/// Mounts a token endpoint that issues a long-lived test token.
async fn mount_token_endpoint(server: &MockServer, expected_exchanges: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-access-token",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(expected_exchanges)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_url_bulk_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_string_contains("https://example.com/blog/post-a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/blog/post-a"]).await.unwrap();

    assert!(report.overall_success);
    assert_eq!(report.summary.attempted, 1);
    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 0);

    let result = &report.results[0];
    assert_eq!(result.provider, Provider::IndexNow);
    assert!(result.success);
    assert_eq!(result.status, Some(200));
    assert_eq!(result.urls, vec!["https://example.com/blog/post-a".to_string()]);

    // The signed-auth provider was never configured: skipped, not failed.
    assert_eq!(report.summary.providers_skipped, 1);
    assert_eq!(report.skipped[0].provider, Provider::GoogleIndexing);
}

#[tokio::test]
async fn test_unconfigured_provider_never_counts_as_attempted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(202))
        .expect(2)
        .mount(&server)
        .await;

    // Batch size 1 so each URL is its own bulk call.
    let mut config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    config.indexnow.as_mut().unwrap().max_batch_size = 1;
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/blog/post-a", "/blog"]).await.unwrap();

    assert!(report.overall_success);
    assert_eq!(report.summary.attempted, 2);
    assert_eq!(report.summary.succeeded, 2);
    assert!(report
        .results
        .iter()
        .all(|r| r.provider == Provider::IndexNow));
    assert_eq!(report.summary.providers_skipped, 1);
}

#[tokio::test]
async fn test_bulk_failure_does_not_sink_signed_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(header("authorization", "Bearer test-access-token"))
        .and(body_json(serde_json::json!({
            "url": "https://example.com/blog/post-a",
            "type": "URL_UPDATED",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    config.google = Some(google_config(&server));
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/blog/post-a"]).await.unwrap();

    // One working provider is sufficient.
    assert!(report.overall_success);
    assert_eq!(report.summary.attempted, 2);
    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 1);
    assert!(report.skipped.is_empty());

    let bulk = report
        .results
        .iter()
        .find(|r| r.provider == Provider::IndexNow)
        .expect("bulk result present");
    assert!(!bulk.success);
    assert_eq!(bulk.status, Some(500));
    assert_eq!(bulk.failure, Some(FailureKind::Submission));
    assert!(bulk.message.as_deref().unwrap().contains("upstream exploded"));

    let signed = report
        .results
        .iter()
        .find(|r| r.provider == Provider::GoogleIndexing)
        .expect("signed result present");
    assert!(signed.success);
    assert_eq!(signed.target, "https://example.com/blog/post-a");
}

#[tokio::test]
async fn test_malformed_url_excluded_but_valid_url_proceeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_string_contains("https://example.com/valid"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["", "/valid"]).await.unwrap();

    assert!(report.overall_success);
    assert_eq!(report.summary.attempted, 2);
    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 1);

    let invalid = report
        .results
        .iter()
        .find(|r| r.provider == Provider::Normalizer)
        .expect("normalization failure recorded");
    assert_eq!(invalid.failure, Some(FailureKind::InvalidUrl));
    assert_eq!(invalid.target, "");

    let bulk = report
        .results
        .iter()
        .find(|r| r.provider == Provider::IndexNow)
        .expect("bulk result present");
    assert!(bulk.success);
    assert_eq!(bulk.urls, vec!["https://example.com/valid".to_string()]);
}

#[tokio::test]
async fn test_every_bulk_endpoint_is_an_independent_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accepts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rejects"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![
        format!("{}/accepts", server.uri()),
        format!("{}/rejects", server.uri()),
    ]);
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/page"]).await.unwrap();

    // Same batch went to both endpoints; one result each.
    assert_eq!(report.summary.attempted, 2);
    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 1);
    assert!(report.overall_success);
}

#[tokio::test]
async fn test_all_providers_down_is_overall_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/page"]).await.unwrap();

    assert!(!report.overall_success);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.succeeded, 0);
    // Unconfigured signed provider is a skip, never a failure.
    assert_eq!(report.summary.providers_skipped, 1);
}

#[tokio::test]
async fn test_slow_endpoint_classified_as_timeout() {
    let server = MockServer::start().await;
    // Response arrives well past the configured request timeout.
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    config.timeout_seconds = 1;
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/page"]).await.unwrap();

    // A timed-out call is a failed result, never a crash.
    assert!(!report.overall_success);
    assert_eq!(report.summary.attempted, 1);
    assert_eq!(report.summary.failed, 1);

    let result = report
        .results
        .iter()
        .find(|r| r.provider == Provider::IndexNow)
        .expect("bulk result present");
    assert_eq!(result.failure, Some(FailureKind::Timeout));
    assert!(result.status.is_none());
}

#[tokio::test]
async fn test_blog_post_convenience_submits_post_and_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    let service = IndexingService::new(config).unwrap();
    let report = service.submit_blog_post("post-a").await.unwrap();

    assert!(report.overall_success);
    let bulk = report
        .results
        .iter()
        .find(|r| r.provider == Provider::IndexNow)
        .expect("bulk result present");
    assert_eq!(
        bulk.urls,
        vec![
            "https://example.com/blog/post-a".to_string(),
            "https://example.com/blog".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_pre_cancelled_submission_reports_cancelled_results() {
    let server = MockServer::start().await;
    // No calls must reach the endpoint once the token is cancelled.
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    let service = IndexingService::new(config).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let report = service
        .submit_with_cancel(&["/page-one", "/page-two"], cancel)
        .await
        .unwrap();

    assert!(!report.overall_success);
    assert!(!report.results.is_empty());
    assert!(report
        .results
        .iter()
        .all(|r| r.failure == Some(FailureKind::Cancelled)));
}

#[tokio::test]
async fn test_advisory_flags_surface_in_report_without_affecting_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_with_bulk(vec![format!("{}/indexnow", server.uri())]);
    config.advisory.sitemap_current = false;
    let service = IndexingService::new(config).unwrap();
    let report = service.submit(&["/page"]).await.unwrap();

    assert!(!report.advisory.sitemap_current);
    assert!(report.advisory.robots_policy_ok);
    // Advisory state is informational only.
    assert!(report.overall_success);
}
