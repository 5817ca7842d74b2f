use actix_web::web;

pub mod admin;
pub mod auth;
pub mod profile;
pub mod students;

/// Configure the public routes.
///
/// The protected scopes (`/api/profile`, `/api/admin`) are wired in
/// `main.rs` with the authentication gate wrapped around them; tests that
/// exercise the gate build the same scopes themselves.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure)
        .configure(auth::configure_routes)
        .configure(students::configure_routes);
}
