use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Origins the portal frontend runs on during local development, used when
/// `CORS_ALLOWED_ORIGINS` provides nothing valid.
const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Build the CORS layer: explicit origin allowlist, only the methods and
/// headers the API actually uses.
pub fn cors_middleware() -> Cors {
    let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let mut origins = parse_origins(&raw);
    if origins.is_empty() {
        origins = DEV_ORIGINS.iter().map(|s| s.to_string()).collect();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

/// Parse a comma-separated origin list, dropping entries that could not be
/// a browser origin (empty, "null", or schemeless).
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
