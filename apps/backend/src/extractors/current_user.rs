use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Verified claims for the caller, read from request extensions where the
/// authentication gate stored them. Only resolvable behind that gate;
/// elsewhere extraction fails as a missing token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(claims.map(CurrentUser).ok_or_else(AppError::missing_token))
    }
}
