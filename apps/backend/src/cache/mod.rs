//! Key-value cache seam.
//!
//! The consumers of this trait only need the minimal contract
//! `GET key`, `SET key value EX seconds`, `DEL key`. Any conforming backend
//! satisfies it; the process normally runs against Redis, tests and
//! cache-less deployments use the in-memory store.
//!
//! Implementations must enforce expiry themselves: an entry past its TTL is
//! never returned, it is as if it were absent.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value. `Ok(None)` means absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value with a time-to-live counted from this write.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Unconditionally delete a key. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}
