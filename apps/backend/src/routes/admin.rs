//! Admin-only routes. Wired under `/api/admin` behind the admin gate.

use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::http::envelope;
use crate::services::stats::{self, DbStatsSource};
use crate::state::app_state::AppState;

async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let source = DbStatsSource::new(db);

    let outcome = stats::get_stats(state.cache(), &source).await?;

    let message = if outcome.from_cache {
        "Stats fetched from cache"
    } else {
        "Stats fetched from database"
    };
    Ok(envelope::ok(outcome.snapshot, message))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/stats").route(web::get().to(get_stats)));
}
