//! Process configuration read from environment variables.
//!
//! Everything here is read once at startup; request handlers only see the
//! values through `AppState`.

use std::env;

use crate::error::AppError;

/// Runtime environment, controls how much error detail leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Production,
    Development,
}

impl RuntimeEnv {
    /// Parse an `APP_ENV` value. Anything other than "production" is
    /// treated as development.
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            RuntimeEnv::Production
        } else {
            RuntimeEnv::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeEnv::Production
    }
}

/// Current runtime environment from `APP_ENV` (defaults to development).
pub fn runtime_env() -> RuntimeEnv {
    env::var("APP_ENV")
        .map(|v| RuntimeEnv::from_value(&v))
        .unwrap_or(RuntimeEnv::Development)
}

/// Database connection URL. Required; the backend does not invent one.
pub fn db_url() -> Result<String, AppError> {
    must_var("DATABASE_URL")
}

/// Redis connection URL (defaults to a local instance).
pub fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

/// Get required environment variable or return a configuration error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

#[cfg(test)]
mod tests {
    use super::RuntimeEnv;

    #[test]
    fn production_value_is_recognized() {
        assert!(RuntimeEnv::from_value("production").is_production());
        assert!(RuntimeEnv::from_value("PRODUCTION").is_production());
    }

    #[test]
    fn anything_else_is_development() {
        for v in ["development", "dev", "test", "", "prod"] {
            assert_eq!(RuntimeEnv::from_value(v), RuntimeEnv::Development);
        }
    }
}
