use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, Role};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// TTL for tokens issued by password login and signup.
pub const LOGIN_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// TTL for tokens issued through Google OAuth.
pub const OAUTH_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Allowed clock skew when checking `exp` during verification.
pub const CLOCK_SKEW_LEEWAY_SECS: u64 = 5;

/// Mint a signed access token with the configured algorithm.
pub fn mint_access_token(
    user_id: i64,
    email: &str,
    role: Role,
    ttl: Duration,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        user_id,
        email: email.to_string(),
        role,
        iat,
        exp: iat + ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// The algorithm is pinned to the one the system issues tokens with; tokens
/// signed with anything else are rejected regardless of signature validity.
/// Failure reasons stay in the error for server-side logging; clients only
/// ever see the generic "invalid or expired" message.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin the algorithm and tighten
    // the leeway from the crate default down to a few seconds.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = CLOCK_SKEW_LEEWAY_SECS;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::token_rejected("token_expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::token_rejected("invalid_signature")
        }
        jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
            AppError::token_rejected("algorithm_mismatch")
        }
        _ => AppError::token_rejected("invalid_token"),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    use super::{
        mint_access_token, verify_access_token, CLOCK_SKEW_LEEWAY_SECS, LOGIN_TOKEN_TTL,
        OAUTH_TOKEN_TTL,
    };
    use crate::auth::claims::{Claims, Role};
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token(
            42,
            "teacher@example.test",
            Role::Teacher,
            LOGIN_TOKEN_TTL,
            now,
            &security,
        )
        .unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "teacher@example.test");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + LOGIN_TOKEN_TTL.as_secs() as i64);
    }

    #[test]
    fn test_oauth_ttl_is_longer() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token(
            1,
            "oauth@example.test",
            Role::Teacher,
            OAUTH_TOKEN_TTL,
            now,
            &security,
        )
        .unwrap();
        let claims = verify_access_token(&token, &security).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token() {
        let security = test_security();
        // Two hours ago, so a one-hour token is well past expiry + leeway.
        let now = SystemTime::now() - Duration::from_secs(2 * 60 * 60);

        let token = mint_access_token(
            1,
            "old@example.test",
            Role::Admin,
            LOGIN_TOKEN_TTL,
            now,
            &security,
        )
        .unwrap();

        match verify_access_token(&token, &security) {
            Err(AppError::TokenRejected { reason }) => assert_eq!(reason, "token_expired"),
            other => panic!("expected token_expired rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_expiry_just_beyond_leeway_is_rejected() {
        let security = test_security();
        // exp landed a few seconds past the leeway window.
        let past = LOGIN_TOKEN_TTL + Duration::from_secs(CLOCK_SKEW_LEEWAY_SECS + 3);
        let now = SystemTime::now() - past;

        let token = mint_access_token(
            1,
            "edge@example.test",
            Role::Teacher,
            LOGIN_TOKEN_TTL,
            now,
            &security,
        )
        .unwrap();

        match verify_access_token(&token, &security) {
            Err(AppError::TokenRejected { reason }) => assert_eq!(reason, "token_expired"),
            other => panic!("expected token_expired rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_expiry_within_leeway_is_accepted() {
        let security = test_security();
        // exp landed a few seconds ago, still inside the leeway window.
        let past = LOGIN_TOKEN_TTL + Duration::from_secs(CLOCK_SKEW_LEEWAY_SECS - 3);
        let now = SystemTime::now() - past;

        let token = mint_access_token(
            1,
            "edge@example.test",
            Role::Teacher,
            LOGIN_TOKEN_TTL,
            now,
            &security,
        )
        .unwrap();

        let claims = verify_access_token(&token, &security).unwrap();
        assert_eq!(claims.email, "edge@example.test");
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token = mint_access_token(
            1,
            "a@example.test",
            Role::Admin,
            LOGIN_TOKEN_TTL,
            SystemTime::now(),
            &security_a,
        )
        .unwrap();

        match verify_access_token(&token, &security_b) {
            Err(AppError::TokenRejected { reason }) => assert_eq!(reason, "invalid_signature"),
            other => panic!("expected invalid_signature rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_algorithm_is_pinned() {
        // Sign a structurally valid token with HS384 and the same secret.
        // Verification must reject it: no algorithm negotiation.
        let security = test_security();
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            user_id: 1,
            email: "a@example.test".to_string(),
            role: Role::Admin,
            iat,
            exp: iat + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        assert!(verify_access_token(&token, &security).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let security = test_security();
        match verify_access_token("not-a-jwt", &security) {
            Err(AppError::TokenRejected { .. }) => {}
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
