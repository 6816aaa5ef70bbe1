//! Environment-driven configuration loading.

use anyhow::{Context, Result};

use crate::config::types::{Config, GoogleConfig, IndexNowConfig};

/// Environment variable holding the site host (e.g. `example.com`).
pub const ENV_HOST: &str = "INDEX_NOTIFY_HOST";
/// Environment variable holding the IndexNow site key.
pub const ENV_INDEXNOW_KEY: &str = "INDEXNOW_KEY";
/// Environment variable holding a comma-separated endpoint override.
pub const ENV_INDEXNOW_ENDPOINTS: &str = "INDEXNOW_ENDPOINTS";
/// Environment variable holding the service account identity.
pub const ENV_GOOGLE_CLIENT_EMAIL: &str = "GOOGLE_SERVICE_ACCOUNT_EMAIL";
/// Environment variable holding the service account private key (PEM).
pub const ENV_GOOGLE_PRIVATE_KEY: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";

impl Config {
    /// Builds a configuration from environment variables.
    ///
    /// `INDEX_NOTIFY_HOST` is required. Provider credentials are optional:
    /// a provider whose variables are absent is left unconfigured and will
    /// be skipped at submission time. Private keys stored in `.env` files
    /// commonly carry literal `\n` escapes; those are unescaped here.
    ///
    /// # Errors
    ///
    /// Returns an error only if the host variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(ENV_HOST)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .with_context(|| format!("{ENV_HOST} must be set to the site host"))?;

        let mut config = Config::new(host.trim());

        if let Ok(key) = std::env::var(ENV_INDEXNOW_KEY) {
            if !key.trim().is_empty() {
                let mut indexnow = IndexNowConfig::new(key.trim());
                if let Ok(endpoints) = std::env::var(ENV_INDEXNOW_ENDPOINTS) {
                    let endpoints: Vec<String> = endpoints
                        .split(',')
                        .map(|e| e.trim().to_string())
                        .filter(|e| !e.is_empty())
                        .collect();
                    if !endpoints.is_empty() {
                        indexnow.endpoints = endpoints;
                    }
                }
                config.indexnow = Some(indexnow);
            }
        }

        let client_email = std::env::var(ENV_GOOGLE_CLIENT_EMAIL).ok();
        let private_key = std::env::var(ENV_GOOGLE_PRIVATE_KEY).ok();
        if let (Some(email), Some(key)) = (client_email, private_key) {
            if !email.trim().is_empty() && !key.trim().is_empty() {
                config.google = Some(GoogleConfig::new(
                    email.trim(),
                    key.replace("\\n", "\n"),
                ));
            }
        }

        Ok(config)
    }
}
