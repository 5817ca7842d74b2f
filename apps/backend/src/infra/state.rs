use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::google::GoogleAuthConfig;
use crate::cache::CacheStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main).
///
/// Every resource is constructed by the caller and injected; the builder
/// only assembles them. Omitted resources stay `None` and the affected
/// surface degrades per its own policy.
pub struct StateBuilder {
    db: Option<DatabaseConnection>,
    cache: Option<Arc<dyn CacheStore>>,
    security: Option<SecurityConfig>,
    google: Option<GoogleAuthConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db: None,
            cache: None,
            security: None,
            google: None,
        }
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_google(mut self, google: GoogleAuthConfig) -> Self {
        self.google = Some(google);
        self
    }

    pub fn build(self) -> AppState {
        AppState::new(self.db, self.cache, self.security, self.google)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::build_state;
    use crate::cache::MemoryStore;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn build_succeeds_with_no_resources() {
        let state = build_state().build();
        assert!(state.db().is_none());
        assert!(state.cache().is_none());
        assert!(state.security().is_none());
        assert!(state.google().is_none());
    }

    #[test]
    fn build_carries_injected_handles() {
        let state = build_state()
            .with_cache(Arc::new(MemoryStore::new()))
            .with_security(SecurityConfig::new("s".as_bytes()))
            .build();
        assert!(state.cache().is_some());
        assert!(state.security().is_some());
    }
}
