//! Shared HTTP response handling for the Supabase adapters.
//!
//! GoTrue and PostgREST report failures as JSON bodies whose message lives
//! under different keys; [`check_response`] normalizes them to a status plus
//! the service's own wording.

use crate::error::{ProviderError, StoreError};

/// Non-success answer from a Supabase service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpFailure {
    pub status: u16,
    pub message: String,
}

impl From<HttpFailure> for ProviderError {
    fn from(failure: HttpFailure) -> Self {
        Self::Api {
            status: failure.status,
            message: failure.message,
        }
    }
}

impl From<HttpFailure> for StoreError {
    fn from(failure: HttpFailure) -> Self {
        Self::Api {
            status: failure.status,
            message: failure.message,
        }
    }
}

/// Return the response unchanged on success, otherwise an [`HttpFailure`]
/// carrying the most specific message the body offers.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, HttpFailure> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(HttpFailure {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        }),
    })
}

/// First non-empty message field: GoTrue uses `error_description`/`msg`,
/// PostgREST uses `message`, older endpoints a bare `error`.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
