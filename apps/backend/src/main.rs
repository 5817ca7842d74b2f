use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::auth::google::GoogleAuthConfig;
use backend::cache::RedisStore;
use backend::config;
use backend::infra::db::connect_db;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_log::RequestLog;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    // Missing secret is a deployment defect. The process still starts so the
    // health endpoint answers, but every protected route fails closed.
    let security = SecurityConfig::from_env();
    if security.is_none() {
        error!("JWT_SECRET is not set; protected routes will fail closed");
    }

    let db_url = config::db_url().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let db = match connect_db(&db_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    // The cache is an optimization; running without it only costs stats
    // recomputation per request.
    let cache = match RedisStore::connect(&config::redis_url()).await {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!(error = %e, "Redis unavailable, stats cache disabled");
            None
        }
    };

    let google = GoogleAuthConfig::from_env();
    if google.is_none() {
        warn!("GOOGLE_CLIENT_ID is not set; Google Sign-In disabled");
    }

    let mut builder = build_state().with_db(db);
    if let Some(cache) = cache {
        builder = builder.with_cache(cache);
    }
    if let Some(security) = security {
        builder = builder.with_security(security);
    }
    if let Some(google) = google {
        builder = builder.with_google(google);
    }
    let app_state = builder.build();

    info!(%host, %port, "starting school portal backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestLog)
            .app_data(data.clone())
            .service(
                web::scope("/api/admin")
                    .wrap(JwtExtract::admin_only())
                    .configure(routes::admin::configure_routes),
            )
            .service(
                web::scope("/api/profile")
                    .wrap(JwtExtract::authenticated())
                    .configure(routes::profile::configure_routes),
            )
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
