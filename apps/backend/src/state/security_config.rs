use jsonwebtoken::Algorithm;

/// Configuration for JWT security settings.
///
/// There is deliberately no `Default` impl: an unset secret must surface as
/// a configuration error on protected routes, never be papered over with a
/// hardcoded fallback.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm; pinned, never negotiated per request
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Read `JWT_SECRET` from the environment. Returns `None` when unset or
    /// empty; the caller decides how loudly to fail.
    pub fn from_env() -> Option<Self> {
        std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| Self::new(s.into_bytes()))
    }
}
