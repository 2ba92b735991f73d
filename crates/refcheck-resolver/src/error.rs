//! Resolver error types.

use thiserror::Error;

/// Errors that can occur when asking a resolution service about a DOI.
///
/// None of these mean "the DOI does not exist"; a missing DOI is reported as
/// `Ok(None)` by the lookup functions.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP transport error, including timeouts and refused connections.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status other than 404.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or (truncated) response body.
        message: String,
    },

    /// Failed to parse a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The requested resolution source is not supported.
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
