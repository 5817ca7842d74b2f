//! Shared helpers for integration tests.

use std::time::{Duration, SystemTime};

use actix_web::body::to_bytes;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::HttpResponse;

use backend::auth::claims::Role;
use backend::auth::jwt::{mint_access_token, LOGIN_TOKEN_TTL};
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// State with a signing secret but no database or cache; enough for
/// exercising the authentication gate.
pub fn state_with_security() -> AppState {
    build_state()
        .with_security(SecurityConfig::new(TEST_SECRET.as_bytes()))
        .build()
}

/// State with no resources at all; protected routes must fail closed.
pub fn bare_state() -> AppState {
    build_state().build()
}

/// Mint a token signed with `secret`, issued at `now`.
pub fn mint(secret: &str, user_id: i64, email: &str, role: Role, now: SystemTime) -> String {
    let security = SecurityConfig::new(secret.as_bytes());
    mint_access_token(user_id, email, role, LOGIN_TOKEN_TTL, now, &security)
        .expect("failed to mint test token")
}

/// Token that is valid right now.
pub fn fresh_token(role: Role) -> String {
    mint(TEST_SECRET, 42, "user@example.test", role, SystemTime::now())
}

/// Token whose expiry is well past, beyond any leeway.
pub fn expired_token(role: Role) -> String {
    let issued = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    mint(TEST_SECRET, 42, "user@example.test", role, issued)
}

/// Call the service and return status plus body bytes.
///
/// Gate refusals surface as service-level errors in the test harness; the
/// real dispatcher renders them through `ResponseError`, so do the same
/// here instead of panicking.
pub async fn status_and_body<S>(app: &S, req: actix_http::Request) -> (StatusCode, Bytes)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    match app.call(req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.expect("body read");
            (status, body)
        }
        Err(err) => {
            let resp = HttpResponse::from_error(err);
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.expect("body read");
            (status, body)
        }
    }
}
