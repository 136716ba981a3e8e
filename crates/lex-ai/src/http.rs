//! Response status handling for the generative API.
//!
//! 429 becomes [`AiError::RateLimited`] (with `Retry-After` parsing), any
//! other non-success becomes [`AiError::Api`] carrying the message from
//! Google's `{"error": {"message": ...}}` envelope when present.

use crate::error::AiError;

pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AiError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(AiError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AiError::Api {
            status,
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value["error"]["message"]
                .as_str()
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
