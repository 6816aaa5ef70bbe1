//! Configuration types.
//!
//! This module defines the service configuration structs and the enums used
//! for command-line argument parsing.

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_INDEXNOW_ENDPOINTS, DEFAULT_PRIORITY_PATHS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, GOOGLE_INDEXING_ENDPOINT, GOOGLE_INDEXING_SCOPE, GOOGLE_TOKEN_ENDPOINT,
    INDEXNOW_MAX_BATCH_SIZE,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration for the bulk-notification provider (IndexNow protocol).
///
/// The key is a site-owned token the provider verifies by fetching
/// `key_location`. When `key_location` is `None`, the conventional
/// `https://{host}/{key}.txt` location is assumed.
#[derive(Debug, Clone)]
pub struct IndexNowConfig {
    /// Site verification key included in every submission
    pub key: String,

    /// Where the provider can fetch the key file (defaults to
    /// `https://{host}/{key}.txt` when absent)
    pub key_location: Option<String>,

    /// Endpoints to notify; each one receives every batch
    pub endpoints: Vec<String>,

    /// Maximum URLs per submission request
    pub max_batch_size: usize,
}

impl IndexNowConfig {
    /// Creates a bulk-provider configuration with the default endpoints and
    /// batch limit.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_location: None,
            endpoints: DEFAULT_INDEXNOW_ENDPOINTS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_batch_size: INDEXNOW_MAX_BATCH_SIZE,
        }
    }
}

/// Configuration for the signed-auth provider (Google Indexing API style).
///
/// Holds the long-lived service-account identity and private key used to
/// mint short-lived access tokens. Absence of this entire struct is the
/// expected "provider unconfigured" state, not an error.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Service account identity (the `iss` claim of the signed assertion)
    pub client_email: String,

    /// RSA private key in PEM format used to sign the assertion
    pub private_key_pem: String,

    /// OAuth token endpoint (the `aud` claim of the signed assertion)
    pub token_endpoint: String,

    /// Per-URL notification endpoint
    pub submission_endpoint: String,

    /// OAuth scope requested in the assertion
    pub scope: String,
}

impl GoogleConfig {
    /// Creates a signed-auth provider configuration with the production
    /// endpoints and scope.
    pub fn new(client_email: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key_pem: private_key_pem.into(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            submission_endpoint: GOOGLE_INDEXING_ENDPOINT.to_string(),
            scope: GOOGLE_INDEXING_SCOPE.to_string(),
        }
    }
}

/// Static discovery-surface flags consumed by the passive advisory checker.
///
/// These describe configuration state the operator asserts about the site
/// (crawl policy, sitemap, feed, internal links). They are reported as-is;
/// no network calls are made to verify them.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryConfig {
    /// Crawl policy file allows the expected crawlers
    pub robots_policy_ok: bool,
    /// Sitemap carries a current freshness marker
    pub sitemap_current: bool,
    /// Syndication feed is available
    pub feed_available: bool,
    /// Internal-link health marker is set
    pub internal_links_ok: bool,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            robots_policy_ok: true,
            sitemap_current: true,
            feed_available: true,
            internal_links_ok: true,
        }
    }
}

/// Service configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically or from the environment via
/// [`Config::from_env`].
///
/// A provider whose configuration is `None` is skipped — that is a valid,
/// expected state, not a startup error.
///
/// # Examples
///
/// ```no_run
/// use index_notify::{Config, IndexNowConfig};
///
/// let mut config = Config::new("example.com");
/// config.indexnow = Some(IndexNowConfig::new("0123456789abcdef"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Site host used to absolutize relative paths (e.g. `example.com`)
    pub host: String,

    /// Bulk-notification provider configuration, if configured
    pub indexnow: Option<IndexNowConfig>,

    /// Signed-auth provider configuration, if configured
    pub google: Option<GoogleConfig>,

    /// Discovery-surface flags for the passive advisory checker
    pub advisory: AdvisoryConfig,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Paths submitted by `submit_priority_urls` after sweeping site updates
    pub priority_paths: Vec<String>,
}

impl Config {
    /// Creates a configuration for the given host with both providers
    /// unconfigured and default timeouts.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            indexnow: None,
            google: None,
            advisory: AdvisoryConfig::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            priority_paths: DEFAULT_PRIORITY_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_new_defaults() {
        let config = Config::new("example.com");
        assert_eq!(config.host, "example.com");
        assert!(config.indexnow.is_none());
        assert!(config.google.is_none());
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(config.advisory.robots_policy_ok);
    }

    #[test]
    fn test_indexnow_config_defaults() {
        let config = IndexNowConfig::new("my-key");
        assert_eq!(config.key, "my-key");
        assert!(config.key_location.is_none());
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.max_batch_size, INDEXNOW_MAX_BATCH_SIZE);
    }

    #[test]
    fn test_google_config_defaults() {
        let config = GoogleConfig::new("svc@project.iam.gserviceaccount.com", "PEM");
        assert_eq!(config.token_endpoint, GOOGLE_TOKEN_ENDPOINT);
        assert_eq!(config.submission_endpoint, GOOGLE_INDEXING_ENDPOINT);
        assert_eq!(config.scope, GOOGLE_INDEXING_SCOPE);
    }
}
