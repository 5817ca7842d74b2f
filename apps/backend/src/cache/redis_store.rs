//! Redis-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use super::{CacheError, CacheStore};
use crate::error::AppError;

/// Cache store over a process-wide Redis connection.
///
/// The `ConnectionManager` is established once at startup and shared by all
/// request handlers; it reconnects on its own after transient failures.
/// Expiry is enforced server-side by `SET .. EX`, so a hit here is never
/// stale beyond the TTL.
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|e| AppError::config(format!("Invalid REDIS_URL: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::config(format!("Unable to connect to Redis: {e}")))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}
