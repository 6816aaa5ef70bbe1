//! Credential lifecycle for the signed-auth provider.
//!
//! The provider's long-lived private signing key never leaves this process.
//! Instead, a short-lived signed assertion is exchanged for a bearer access
//! token (RFC 7523 JWT-bearer grant), and the token is cached until it nears
//! expiry. The cache is owned by a single [`CredentialManager`] instance and
//! guarded by a mutex so concurrent submission runs share one valid token
//! rather than racing to mint duplicates (last writer wins).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::{
    GoogleConfig, JWT_BEARER_GRANT_TYPE, TOKEN_LIFETIME_SECS, TOKEN_SAFETY_MARGIN_SECS,
};
use crate::error_handling::CredentialError;

/// A short-lived bearer token minted from the provider's private key.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Opaque token value, sent as `Authorization: Bearer {value}`
    pub value: String,
    /// When the provider will stop accepting this token
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is still safely usable at `now`.
    ///
    /// A token is only reused while `now < expires_at - safety_margin`, so a
    /// token that would expire mid-run is refreshed up front rather than
    /// failing halfway through a submission.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(TOKEN_SAFETY_MARGIN_SECS)
    }
}

/// Claim set of the signed assertion (RFC 7523).
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Token endpoint success response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Token endpoint error response.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchanges a signed assertion for a cached short-lived access token.
///
/// One instance exists per signed-auth provider, owned by the aggregator and
/// handed to the submitter. The token is never shared across providers and
/// never persisted: a process restart simply mints a fresh one on first use.
pub struct CredentialManager {
    config: Option<GoogleConfig>,
    client: Arc<reqwest::Client>,
    cached: Mutex<Option<AccessToken>>,
}

impl CredentialManager {
    /// Creates a credential manager. `config == None` is the valid
    /// "provider unconfigured" state: every `token()` call will short-circuit
    /// to [`CredentialError::Unconfigured`] without touching the network.
    pub fn new(config: Option<GoogleConfig>, client: Arc<reqwest::Client>) -> Self {
        Self {
            config,
            client,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, reusing the cached one while it is
    /// fresh and exchanging a new signed assertion otherwise.
    ///
    /// # Errors
    ///
    /// - [`CredentialError::Unconfigured`] if no credential material exists.
    ///   This is checked before any signing or network work.
    /// - [`CredentialError::ExchangeFailed`] if the key fails to sign or the
    ///   provider rejects the exchange; carries the provider's
    ///   `error_description` verbatim when one was returned.
    pub async fn token(&self) -> Result<AccessToken, CredentialError> {
        let config = self.config.as_ref().ok_or(CredentialError::Unconfigured)?;

        // Hold the lock across the exchange so concurrent callers refreshing
        // an expiring token produce one request, not a stampede.
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                debug!("Reusing cached access token (expires {})", token.expires_at);
                return Ok(token.clone());
            }
        }

        let token = self.exchange(config).await?;
        info!(
            "Obtained access token for {} (expires {})",
            config.client_email, token.expires_at
        );
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Signs a fresh assertion and exchanges it at the token endpoint.
    async fn exchange(&self, config: &GoogleConfig) -> Result<AccessToken, CredentialError> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &config.client_email,
            scope: &config.scope,
            aud: &config.token_endpoint,
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(config.private_key_pem.as_bytes())
            .map_err(|e| CredentialError::ExchangeFailed(format!("invalid private key: {e}")))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| CredentialError::ExchangeFailed(format!("failed to sign assertion: {e}")))?;

        let response = self
            .client
            .post(&config.token_endpoint)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CredentialError::ExchangeFailed(format!("token endpoint error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the provider's error_description verbatim when present.
            let detail = serde_json::from_str::<TokenErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or(body);
            return Err(CredentialError::ExchangeFailed(format!(
                "HTTP {}: {detail}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            CredentialError::ExchangeFailed(format!("malformed token response: {e}"))
        })?;

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Utc::now()
                + Duration::seconds(token.expires_in.unwrap_or(TOKEN_LIFETIME_SECS)),
        })
    }
}
