//! Token authentication gate.
//!
//! Wrapped around protected scopes. Extracts the bearer token from the
//! Authorization header, verifies it, optionally enforces the admin role,
//! and stores the claims in request extensions for handlers to read. A
//! request that fails any step never reaches the wrapped service.
//!
//! Distinct failures map to distinct responses: a missing or malformed
//! header is 401, a token that fails verification is 403 with a generic
//! message, and a valid token with an insufficient role is 403 with an
//! access-denied message.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::claims::Role;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// What the gate demands beyond a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleRequirement {
    Authenticated,
    Admin,
}

pub struct JwtExtract {
    requirement: RoleRequirement,
}

impl JwtExtract {
    /// Gate that accepts any valid token.
    pub fn authenticated() -> Self {
        Self {
            requirement: RoleRequirement::Authenticated,
        }
    }

    /// Gate that additionally requires the admin role.
    pub fn admin_only() -> Self {
        Self {
            requirement: RoleRequirement::Admin,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service,
            requirement: self.requirement,
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
    requirement: RoleRequirement,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        let token = match extract_bearer(auth_header.as_ref()) {
            Ok(token) => token,
            Err(err) => return Box::pin(async move { Err(err.into()) }),
        };

        let app_state = match app_state {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal("AppState not available").into())
                });
            }
        };

        // Fail closed: without a signing secret no token can be trusted.
        let security = match app_state.security() {
            Some(security) => security.clone(),
            None => {
                return Box::pin(async {
                    Err(AppError::config("JWT_SECRET is not configured").into())
                });
            }
        };

        let claims = match verify_access_token(&token, &security) {
            Ok(claims) => claims,
            Err(err) => {
                if let AppError::TokenRejected { reason } = &err {
                    warn!(reason, path = %req.path(), "rejected bearer token");
                }
                return Box::pin(async move { Err(err.into()) });
            }
        };

        if self.requirement == RoleRequirement::Admin && claims.role != Role::Admin {
            warn!(user_id = claims.user_id, path = %req.path(), "non-admin denied");
            return Box::pin(async {
                Err(AppError::forbidden("Access denied: admin only").into())
            });
        }

        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// Anything short of that exact shape is a missing-token failure; this path
/// never inspects the token itself.
fn extract_bearer(header_value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::missing_token)?;
    let auth_str = auth_value.to_str().map_err(|_| AppError::missing_token())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::missing_token());
    }

    Ok(parts[1].to_string())
}
