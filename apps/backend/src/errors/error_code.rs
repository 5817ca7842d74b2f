//! Error codes for the portal backend API.
//!
//! The API exposes a closed set of codes; add new codes here, never pass
//! ad-hoc strings. Each variant maps 1:1 to the SCREAMING_SNAKE_CASE string
//! that appears in the response envelope.

use core::fmt;

/// Centralized error codes used in the `error.code` field of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Client input failed validation (missing/malformed fields, conflicts)
    ValidationError,
    /// Authentication or authorization failure
    AuthError,
    /// Requested resource does not exist
    NotFound,
    /// Database query or connection failure
    DbError,
    /// Anything else, including configuration defects
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_are_screaming_snake_case() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::AuthError,
            ErrorCode::NotFound,
            ErrorCode::DbError,
            ErrorCode::InternalError,
        ];
        for code in codes {
            let s = code.as_str();
            assert!(!s.is_empty());
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn codes_are_unique() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::AuthError,
            ErrorCode::NotFound,
            ErrorCode::DbError,
            ErrorCode::InternalError,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
