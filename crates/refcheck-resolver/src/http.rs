//! Shared HTTP response helpers for resolution clients.
//!
//! Centralizes status-code checks so the per-service modules stay focused on
//! request construction and response mapping:
//! - **404 Not Found** → `Ok(None)`, the only path to a not-found verdict
//! - **429 Too Many Requests** → [`ResolveError::RateLimited`]
//! - **other non-success** → [`ResolveError::Api`]

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ResolveError;

/// Longest response body kept in an [`ResolveError::Api`] message.
const MAX_ERROR_BODY: usize = 200;

/// Check an HTTP response for common error conditions.
///
/// Returns `Ok(Some(resp))` on success and `Ok(None)` on 404.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<Option<reqwest::Response>, ResolveError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ResolveError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ResolveError::Api {
            status: status.as_u16(),
            message: truncate(body.trim(), MAX_ERROR_BODY),
        });
    }
    Ok(Some(resp))
}

/// Read the body and deserialize it, reporting malformed JSON as
/// [`ResolveError::Parse`] rather than a transport error.
pub async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, ResolveError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ResolveError::Parse(format!("{what}: {e}")))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
