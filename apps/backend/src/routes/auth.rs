//! Signup, login, and Google sign-in routes.

use std::str::FromStr;
use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Role;
use crate::auth::jwt::{mint_access_token, LOGIN_TOKEN_TTL, OAUTH_TOKEN_TTL};
use crate::entities::users;
use crate::error::AppError;
use crate::http::envelope;
use crate::repos::users::role_of;
use crate::services::{stats, users as user_service};
use crate::state::app_state::AppState;

// Request fields are all optional so absence surfaces as a 400 with a
// precise message instead of a deserialization error outside the envelope.

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub credential: Option<String>,
}

/// User summary returned by auth routes. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub avatar: Option<String>,
}

impl From<&users::Model> for UserResponse {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserResponse,
    pub token: String,
}

fn required<'a>(field: Option<&'a String>, message: &str) -> Result<&'a str, AppError> {
    match field.map(String::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::invalid(message)),
    }
}

fn parse_role(raw: Option<&String>) -> Result<Option<Role>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => Role::from_str(s)
            .map(Some)
            .map_err(|_| AppError::invalid("Invalid role")),
    }
}

fn mint_for(
    state: &AppState,
    user: &users::Model,
    ttl: std::time::Duration,
) -> Result<String, AppError> {
    let security = state
        .security()
        .ok_or_else(|| AppError::config("JWT_SECRET is not configured"))?;
    let role = role_of(user)?;
    mint_access_token(user.id, &user.email, role, ttl, SystemTime::now(), security)
}

async fn signup(
    body: web::Json<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = required(body.email.as_ref(), "Email and password are required")?;
    let password = required(body.password.as_ref(), "Email and password are required")?;
    if password.len() < 6 {
        return Err(AppError::invalid("Password must be at least 6 characters"));
    }
    let role = parse_role(body.role.as_ref())?;

    let user = user_service::signup(
        &state,
        email.to_lowercase(),
        password.to_string(),
        body.name.clone(),
        role,
    )
    .await?;

    // The user count changed; drop the cached stats snapshot now that the
    // insert is committed.
    stats::invalidate(state.cache()).await;

    let token = mint_for(&state, &user, LOGIN_TOKEN_TTL)?;
    Ok(envelope::created(
        AuthData {
            user: UserResponse::from(&user),
            token,
        },
        "User registered successfully",
    ))
}

async fn login(
    body: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = required(body.email.as_ref(), "Email and password are required")?;
    let password = required(body.password.as_ref(), "Email and password are required")?;

    let user = user_service::authenticate(&state, &email.to_lowercase(), password).await?;
    let token = mint_for(&state, &user, LOGIN_TOKEN_TTL)?;

    Ok(envelope::ok(
        AuthData {
            user: UserResponse::from(&user),
            token,
        },
        "Login successful",
    ))
}

async fn google(
    body: web::Json<GoogleAuthRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let credential = required(body.credential.as_ref(), "Google credential is required")?;

    let google = state
        .google()
        .ok_or_else(|| AppError::config("Google Sign-In is not configured"))?;
    let profile = google.verify_id_token(credential).await?;

    let (user, created) = user_service::ensure_google_user(&state, profile).await?;
    if created {
        stats::invalidate(state.cache()).await;
    }

    // OAuth sessions get a longer-lived token than password logins.
    let token = mint_for(&state, &user, OAUTH_TOKEN_TTL)?;
    let data = AuthData {
        user: UserResponse::from(&user),
        token,
    };

    if created {
        Ok(envelope::created(data, "User registered successfully"))
    } else {
        Ok(envelope::ok(data, "Login successful"))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/signup").route(web::post().to(signup)))
        .service(web::resource("/api/auth/login").route(web::post().to(login)))
        .service(web::resource("/api/auth/google").route(web::post().to(google)));
}

#[cfg(test)]
mod tests {
    use super::{parse_role, required};
    use crate::auth::claims::Role;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(required(None, "msg").is_err());
        assert!(required(Some(&"   ".to_string()), "msg").is_err());
        assert_eq!(required(Some(&" a@b.c ".to_string()), "msg").unwrap(), "a@b.c");
    }

    #[test]
    fn role_parsing_is_strict() {
        assert_eq!(parse_role(None).unwrap(), None);
        assert_eq!(
            parse_role(Some(&"ADMIN".to_string())).unwrap(),
            Some(Role::Admin)
        );
        assert!(parse_role(Some(&"admin".to_string())).is_err());
    }
}
