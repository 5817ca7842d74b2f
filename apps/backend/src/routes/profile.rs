//! Profile route. Wired under `/api/profile` behind the authentication
//! gate; any valid role passes.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::envelope;

async fn get_profile(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(envelope::ok(
        json!({ "user": user.0 }),
        "You have accessed a protected route!",
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(get_profile)));
}
