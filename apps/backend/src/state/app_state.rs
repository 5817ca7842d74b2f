use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::google::GoogleAuthConfig;
use crate::cache::CacheStore;

/// Application state containing shared, process-wide resources.
///
/// Every handle is injected at startup and cloned per worker; request
/// handlers never construct connections themselves. Each field is optional
/// so partial deployments degrade explicitly instead of panicking:
/// a missing database fails the affected routes, a missing cache means the
/// stats endpoint always recomputes, a missing security config fails every
/// protected route closed with a configuration error.
#[derive(Clone)]
pub struct AppState {
    db: Option<DatabaseConnection>,
    cache: Option<Arc<dyn CacheStore>>,
    security: Option<SecurityConfig>,
    google: Option<GoogleAuthConfig>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        cache: Option<Arc<dyn CacheStore>>,
        security: Option<SecurityConfig>,
        google: Option<GoogleAuthConfig>,
    ) -> Self {
        Self {
            db,
            cache,
            security,
            google,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn cache(&self) -> Option<&dyn CacheStore> {
        self.cache.as_deref()
    }

    pub fn security(&self) -> Option<&SecurityConfig> {
        self.security.as_ref()
    }

    pub fn google(&self) -> Option<&GoogleAuthConfig> {
        self.google.as_ref()
    }
}
