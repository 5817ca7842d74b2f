//! Fixed JSON response envelope shared by every API route.
//!
//! Success and error responses both use the same shape:
//! `{ success, message, data, error?, timestamp }`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::errors::ErrorCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<serde_json::Value>,
}

/// Current UTC time as an RFC 3339 string for the `timestamp` field.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// 200 success envelope.
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    with_status(StatusCode::OK, data, message)
}

/// 201 success envelope.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    with_status(StatusCode::CREATED, data, message)
}

fn with_status<T: Serialize>(
    status: StatusCode,
    data: T,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status).json(Envelope {
        success: true,
        message: message.into(),
        data: Some(data),
        error: None,
        timestamp: now_rfc3339(),
    })
}

/// Error envelope body. The caller picks the HTTP status.
pub fn error_envelope(
    code: ErrorCode,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> Envelope<serde_json::Value> {
    Envelope {
        success: false,
        message: message.into(),
        data: None,
        error: Some(ErrorBody {
            code: code.as_str().to_string(),
            details,
        }),
        timestamp: now_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{error_envelope, now_rfc3339, Envelope};
    use crate::errors::ErrorCode;

    #[test]
    fn success_envelope_serializes_data_and_omits_error() {
        let env = Envelope {
            success: true,
            message: "Success".to_string(),
            data: Some(json!({"id": 1})),
            error: None,
            timestamp: now_rfc3339(),
        };
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["id"], json!(1));
        assert!(value.get("error").is_none());
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn error_envelope_nulls_data_and_carries_code() {
        let env = error_envelope(ErrorCode::NotFound, "Student not found", None);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value["data"].is_null());
        assert_eq!(value["error"]["code"], json!("NOT_FOUND"));
        assert!(value["error"].get("details").is_none());
    }

    #[test]
    fn error_details_survive_roundtrip() {
        let env = error_envelope(
            ErrorCode::InternalError,
            "boom",
            Some(json!("stack goes here")),
        );
        let raw = serde_json::to_string(&env).unwrap();
        let back: Envelope<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.error.unwrap().details.unwrap(), json!("stack goes here"));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = now_rfc3339();
        assert!(time::OffsetDateTime::parse(
            &ts,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok());
    }
}
