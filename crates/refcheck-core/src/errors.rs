//! Cross-cutting error types for refcheck.
//!
//! Transport and service errors live in `refcheck-resolver`; configuration
//! errors live in `refcheck-config`. The binary converges them with `anyhow`.

use thiserror::Error;

/// Errors raised while building core values from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The input is not a syntactically valid DOI.
    #[error("invalid DOI '{input}': {reason}")]
    InvalidDoi { input: String, reason: String },

    /// Data failed validation (e.g. an impossible publication year).
    #[error("validation error: {0}")]
    Validation(String),
}
