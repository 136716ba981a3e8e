//! Generative API error types.

use thiserror::Error;

/// Failures talking to the generative model. Never escapes the public
/// drafting API; callers see fallback text instead.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Quota exhausted; the API asked us to back off.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}
