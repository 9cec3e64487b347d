//! Response decoding
//!
//! Turns a raw response body into [`UltrahumanData`]:
//! raw bytes → validated envelope → body-reported error or assembled data.
//! Decoding is pure and holds no state between calls.

use crate::error::ApiError;
use crate::schema::{UltrahumanData, UltrahumanResponse};

/// Decode a response body into metrics data.
///
/// Malformed JSON and envelope violations produce [`ApiError::Parse`]. A
/// non-empty `error` in the body is raised as the kind mapped from the
/// envelope `status`, regardless of the HTTP status the body arrived with.
pub fn decode(body: &[u8]) -> Result<UltrahumanData, ApiError> {
    let envelope = decode_envelope(body)?;
    if let Some(err) = envelope.reported_error() {
        tracing::warn!(
            status = envelope.status,
            error = %err,
            "API reported an error in the response body"
        );
        return Err(err);
    }

    let data = envelope.data;
    let untyped = data.untyped_count();
    if untyped > 0 {
        tracing::debug!(untyped, "some metric entries kept their untyped payload");
    }
    Ok(data)
}

/// Decode and validate the envelope without acting on its `error` field
pub fn decode_envelope(body: &[u8]) -> Result<UltrahumanResponse, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
}
