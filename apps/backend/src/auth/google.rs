//! Google ID-token verification.
//!
//! Tokens are checked against Google's tokeninfo endpoint; the payload is
//! then validated locally (audience, verified email) before any account is
//! touched.

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Google Sign-In configuration plus the shared HTTP client used to reach
/// the tokeninfo endpoint.
#[derive(Debug, Clone)]
pub struct GoogleAuthConfig {
    client_id: String,
    http: reqwest::Client,
}

impl GoogleAuthConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Read `GOOGLE_CLIENT_ID`; Google Sign-In stays disabled when unset.
    pub fn from_env() -> Option<Self> {
        std::env::var("GOOGLE_CLIENT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
    }

    /// Verify an ID token and return the profile fields the portal uses.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile, AppError> {
        let resp = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AppError::internal(format!("tokeninfo request failed: {e}")))?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "Google token verification failed");
            return Err(AppError::auth("Invalid Google credential"));
        }

        let payload: TokenInfoPayload = resp
            .json()
            .await
            .map_err(|_| AppError::auth("Invalid Google credential"))?;

        validate_payload(payload, &self.client_id)
    }
}

/// Subset of the tokeninfo response the portal cares about.
///
/// The endpoint reports booleans as JSON strings, so `email_verified`
/// accepts either form.
#[derive(Debug, Deserialize)]
pub struct TokenInfoPayload {
    pub aud: String,
    /// Google user id
    pub sub: String,
    pub email: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Verified identity extracted from a Google ID token.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleProfile {
    pub google_id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

fn validate_payload(payload: TokenInfoPayload, client_id: &str) -> Result<GoogleProfile, AppError> {
    if payload.aud != client_id {
        warn!("Google token audience mismatch");
        return Err(AppError::auth("Invalid Google credential"));
    }
    if !payload.email_verified {
        warn!("Google account email is not verified");
        return Err(AppError::auth("Invalid Google credential"));
    }
    Ok(GoogleProfile {
        google_id: payload.sub,
        email: payload.email,
        name: payload.name,
        avatar: payload.picture,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::Str(s) => s == "true",
    })
}

#[cfg(test)]
mod tests {
    use super::{validate_payload, TokenInfoPayload};

    fn payload(aud: &str, verified: bool) -> TokenInfoPayload {
        TokenInfoPayload {
            aud: aud.to_string(),
            sub: "google-sub-123".to_string(),
            email: "user@example.test".to_string(),
            email_verified: verified,
            name: Some("User".to_string()),
            picture: None,
        }
    }

    #[test]
    fn accepts_matching_audience_and_verified_email() {
        let profile = validate_payload(payload("client-1", true), "client-1").unwrap();
        assert_eq!(profile.google_id, "google-sub-123");
        assert_eq!(profile.email, "user@example.test");
    }

    #[test]
    fn rejects_audience_mismatch() {
        assert!(validate_payload(payload("other-app", true), "client-1").is_err());
    }

    #[test]
    fn rejects_unverified_email() {
        assert!(validate_payload(payload("client-1", false), "client-1").is_err());
    }

    #[test]
    fn email_verified_accepts_string_booleans() {
        let raw = r#"{"aud":"a","sub":"s","email":"e@x.test","email_verified":"true"}"#;
        let payload: TokenInfoPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.email_verified);

        let raw = r#"{"aud":"a","sub":"s","email":"e@x.test","email_verified":false}"#;
        let payload: TokenInfoPayload = serde_json::from_str(raw).unwrap();
        assert!(!payload.email_verified);
    }
}
