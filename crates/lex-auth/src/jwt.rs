//! Unverified JWT claim decoding.
//!
//! Used only to learn when an access token expires; signatures are checked
//! by the provider, never here.

use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::ProviderError;

/// Decode the `exp` claim of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns `ProviderError::Decode` if the token is malformed or carries no
/// usable `exp` claim.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, ProviderError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(ProviderError::Decode("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| ProviderError::Decode(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| ProviderError::Decode(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| ProviderError::Decode("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| ProviderError::Decode("invalid exp timestamp".into()))
}

#[cfg(test)]
pub(crate) fn make_jwt(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256"}"#),
        engine.encode(payload),
        engine.encode("fake_sig")
    )
}
