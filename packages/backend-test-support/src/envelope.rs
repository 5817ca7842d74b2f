//! Response-envelope test helpers
//!
//! Local mirror of the backend's JSON envelope so assertions don't depend
//! on backend types. Every API response, success or error, must match:
//! `{ success, message, data, error?, timestamp }`.

use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct EnvelopeLike {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorBodyLike>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub code: String,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Parse response bytes as the envelope, panicking with the raw body on
/// failure so broken responses are easy to diagnose.
pub fn parse_envelope(body: &[u8]) -> EnvelopeLike {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "response body is not a valid envelope: {e}\nbody: {}",
            String::from_utf8_lossy(body)
        )
    })
}

/// Assert an error response: status, `success: false`, null `data`, the
/// expected error code, and (optionally) a message substring.
pub fn assert_error_envelope(
    status: StatusCode,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    message_contains: Option<&str>,
) -> EnvelopeLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let envelope = parse_envelope(body);
    assert!(!envelope.success, "error envelope must have success=false");
    assert!(
        envelope.data.as_ref().map_or(true, Value::is_null),
        "error envelope must not carry data"
    );

    let error = envelope
        .error
        .as_ref()
        .expect("error envelope must carry an error body");
    assert_eq!(error.code, expected_code, "unexpected error code");

    if let Some(needle) = message_contains {
        assert!(
            envelope.message.contains(needle),
            "expected message containing {needle:?}, got {:?}",
            envelope.message
        );
    }

    envelope
}

/// Assert a success response: status, `success: true`, no error body.
pub fn assert_success_envelope(
    status: StatusCode,
    body: &[u8],
    expected_status: StatusCode,
) -> EnvelopeLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let envelope = parse_envelope(body);
    assert!(envelope.success, "success envelope must have success=true");
    assert!(
        envelope.error.is_none(),
        "success envelope must not carry an error body"
    );

    envelope
}
