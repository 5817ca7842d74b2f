//! In-memory cache store.
//!
//! A conforming backend for deployments without Redis and for tests. Keys
//! map to values with an absolute deadline; an entry past its deadline is
//! treated as absent and dropped on the next read.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use super::{CacheError, CacheStore};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Check expiry before handing anything back; the store itself
        // refuses to return stale data.
        let expired = match self.entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::MemoryStore;
    use crate::cache::CacheStore;

    #[tokio::test]
    async fn set_get_del_roundtrip() {
        let store = MemoryStore::new();
        store
            .set_ex("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        store.del("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleting_absent_key_is_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.del("missing").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_refused_once_expired() {
        let store = MemoryStore::new();
        store
            .set_ex("k", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn overwrite_resets_the_deadline() {
        let store = MemoryStore::new();
        store
            .set_ex("k", "old", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        store
            .set_ex("k", "new", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
    }
}
