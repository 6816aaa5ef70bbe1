//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the crate,
//! including timeouts, batch limits, token lifetimes, and provider endpoints.

/// Per-request timeout in seconds for all outbound calls (bulk submissions,
/// credential exchanges, per-URL submissions). A timed-out call is reported
/// as a failed submission, never as a crash.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum URL length accepted by the normalizer.
/// Matches common browser and server limits (e.g., IE, Apache, Nginx defaults).
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum URLs per bulk submission request.
/// The IndexNow protocol accepts up to 10,000 URLs in a single call.
pub const INDEXNOW_MAX_BATCH_SIZE: usize = 10_000;

/// Default bulk-notification endpoints. Each endpoint is treated as an
/// independent target: every batch is submitted to all of them.
pub const DEFAULT_INDEXNOW_ENDPOINTS: [&str; 3] = [
    "https://api.indexnow.org/indexnow",
    "https://www.bing.com/indexnow",
    "https://yandex.com/indexnow",
];

/// OAuth token endpoint used for the JWT-bearer credential exchange.
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Per-URL notification endpoint of the signed-auth provider.
pub const GOOGLE_INDEXING_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// OAuth scope requested in the signed assertion.
pub const GOOGLE_INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

/// Grant type for the JWT-bearer token exchange (RFC 7523).
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime in seconds of the signed assertion and the default lifetime
/// assumed for access tokens when the token response omits `expires_in`.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Safety margin in seconds before token expiry. A cached token is only
/// reused while `now < expires_at - margin`, so a token that would expire
/// mid-run is refreshed up front.
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;

/// Default paths worth resubmitting after a sweeping site update. The
/// sitemap and feed are included because passive crawlers check them first.
pub const DEFAULT_PRIORITY_PATHS: [&str; 3] = ["/", "/sitemap.xml", "/feed.xml"];

/// Default User-Agent header value for all outbound requests.
pub const DEFAULT_USER_AGENT: &str =
    concat!("index_notify/", env!("CARGO_PKG_VERSION"));
