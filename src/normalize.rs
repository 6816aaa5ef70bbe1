//! URL normalization.

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::NormalizeError;

/// Turns a raw path or URL into an absolute, well-formed URL for the given
/// host.
///
/// Rules:
/// - Input starting with `/` is prefixed with `https://{host}`.
/// - Input already starting with `http://` or `https://` passes through
///   unchanged (after a syntax check).
/// - Anything else (empty string, bare words, unsupported schemes, inputs
///   over `MAX_URL_LENGTH`) is rejected with [`NormalizeError`].
///
/// Pure function: submitters never normalize on their own, so every URL that
/// reaches a provider went through here exactly once.
pub fn normalize_url(raw: &str, host: &str) -> Result<String, NormalizeError> {
    let reject = |reason: &str| {
        Err(NormalizeError {
            input: raw.to_string(),
            reason: reason.to_string(),
        })
    };

    if raw.is_empty() {
        return reject("empty input");
    }
    if raw.len() > MAX_URL_LENGTH {
        return reject("exceeds maximum URL length");
    }

    let absolute = if raw.starts_with('/') {
        format!("https://{host}{raw}")
    } else if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        return reject("neither a rooted path nor an absolute http(s) URL");
    };

    if absolute.len() > MAX_URL_LENGTH {
        return reject("exceeds maximum URL length after absolutization");
    }

    match url::Url::parse(&absolute) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(absolute),
        Ok(_) => reject("URL has no host"),
        Err(_) => reject("URL failed to parse"),
    }
}
