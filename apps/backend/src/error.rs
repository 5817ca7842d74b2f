use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::config::{runtime_env, RuntimeEnv};
use crate::errors::ErrorCode;
use crate::http::envelope::{error_envelope, Envelope};

/// Fallback message for 5xx responses in production.
const GENERIC_SERVER_ERROR: &str = "Something went wrong. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { detail: String, status: StatusCode },
    #[error("Missing or malformed bearer token")]
    MissingToken,
    /// Verification failed. The reason is logged server-side and never
    /// echoed to the client.
    #[error("Token rejected: {reason}")]
    TokenRejected { reason: &'static str },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Authentication error: {detail}")]
    Auth { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Envelope error code for this variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingToken
            | AppError::TokenRejected { .. }
            | AppError::InvalidCredentials
            | AppError::Forbidden { .. }
            | AppError::Auth { .. } => ErrorCode::AuthError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Internal { .. } | AppError::Config { .. } => ErrorCode::InternalError,
        }
    }

    /// HTTP status for this variant.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::TokenRejected { .. } => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to send to the client for the given runtime environment.
    ///
    /// 4xx messages are precise. 5xx messages are generic in production and
    /// detailed otherwise. Token verification failures are always generic.
    fn client_message(&self, env: RuntimeEnv) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::MissingToken => "Token missing or invalid format".to_string(),
            AppError::TokenRejected { .. } => "Invalid or expired token".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Forbidden { detail } => detail.clone(),
            AppError::Auth { detail } => detail.clone(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::Db { detail } | AppError::Internal { detail } | AppError::Config { detail } => {
                if env.is_production() {
                    GENERIC_SERVER_ERROR.to_string()
                } else {
                    detail.clone()
                }
            }
        }
    }

    /// `error.details` payload, exposed only outside production and only for
    /// server-side failures. Token rejection reasons never leave the process.
    fn client_details(&self, env: RuntimeEnv) -> Option<serde_json::Value> {
        if env.is_production() {
            return None;
        }
        match self {
            AppError::Db { detail } | AppError::Internal { detail } | AppError::Config { detail } => {
                Some(json!(detail))
            }
            _ => None,
        }
    }

    /// Build the envelope for this error. Factored out of `error_response`
    /// so tests can pin the contract without touching the environment.
    pub fn render(&self, env: RuntimeEnv) -> (StatusCode, Envelope<serde_json::Value>) {
        (
            self.status(),
            error_envelope(self.code(), self.client_message(env), self.client_details(env)),
        )
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
            status: StatusCode::CONFLICT,
        }
    }

    pub fn missing_token() -> Self {
        Self::MissingToken
    }

    pub fn token_rejected(reason: &'static str) -> Self {
        Self::TokenRejected { reason }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn auth(detail: impl Into<String>) -> Self {
        Self::Auth {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let (status, envelope) = self.render(runtime_env());
        HttpResponse::build(status).json(envelope)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::AppError;
    use crate::config::RuntimeEnv;
    use crate::errors::ErrorCode;

    #[test]
    fn missing_token_is_401_auth_error() {
        let err = AppError::missing_token();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), ErrorCode::AuthError);
    }

    #[test]
    fn token_rejection_is_403_with_generic_message() {
        let err = AppError::token_rejected("invalid_signature");
        let (status, envelope) = err.render(RuntimeEnv::Development);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(envelope.message, "Invalid or expired token");
        // The rejection reason must never appear in the envelope, even in dev.
        let body = envelope.error.unwrap();
        assert_eq!(body.code, "AUTH_ERROR");
        assert!(body.details.is_none());
    }

    #[test]
    fn forbidden_message_is_distinct_from_token_rejection() {
        let rejected = AppError::token_rejected("invalid_token");
        let denied = AppError::forbidden("Access denied: admin only");
        let (_, rejected_env) = rejected.render(RuntimeEnv::Development);
        let (status, denied_env) = denied.render(RuntimeEnv::Development);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_ne!(rejected_env.message, denied_env.message);
    }

    #[test]
    fn conflict_maps_to_409_validation_error() {
        let err = AppError::conflict("User already exists");
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn server_errors_are_generic_in_production() {
        let err = AppError::db("connection refused to 10.0.0.5:5432");
        let (_, prod) = err.render(RuntimeEnv::Production);
        assert_eq!(prod.message, "Something went wrong. Please try again later.");
        assert!(prod.error.unwrap().details.is_none());

        let (_, dev) = err.render(RuntimeEnv::Development);
        assert!(dev.message.contains("connection refused"));
        assert!(dev.error.unwrap().details.is_some());
    }

    #[test]
    fn config_error_fails_closed_as_500() {
        let err = AppError::config("JWT_SECRET is not configured");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
