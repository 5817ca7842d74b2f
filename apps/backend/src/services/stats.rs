//! Cache-aside gateway for the admin statistics snapshot.
//!
//! Reads go to the cache first; a miss (absent, expired, or unreachable
//! backend) recomputes from the authoritative store and repopulates the
//! cache with a fixed TTL. Mutating routes call [`invalidate`] after their
//! transaction commits. Concurrent misses may each recompute and overwrite
//! the same key; the snapshot is assembled whole, so the entry is always
//! internally consistent.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::AppError;
use crate::repos;

/// Fixed key naming the aggregate resource.
pub const STATS_CACHE_KEY: &str = "admin:stats";

/// Staleness bound: an entry older than this is never served.
pub const STATS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Until a classes table exists this is a static placeholder.
const ACTIVE_CLASSES_PLACEHOLDER: u64 = 12;

/// Point-in-time aggregate over the authoritative store. Not persisted on
/// its own; always derivable by recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_users: u64,
    pub total_students: u64,
    pub active_classes: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

/// A snapshot plus where it came from. `from_cache` is the explicit signal
/// callers report; origin is never inferred from latency.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsOutcome {
    pub snapshot: StatsSnapshot,
    pub from_cache: bool,
}

/// Entity counts from the authoritative store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityCounts {
    pub users: u64,
    pub students: u64,
}

/// Seam over the authoritative store so the gateway can be exercised
/// without a database.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn counts(&self) -> Result<EntityCounts, AppError>;
}

/// Production source: counts rows through the shared connection pool.
pub struct DbStatsSource<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbStatsSource<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatsSource for DbStatsSource<'_> {
    async fn counts(&self) -> Result<EntityCounts, AppError> {
        let users = repos::users::count(self.db).await?;
        let students = repos::students::count(self.db).await?;
        Ok(EntityCounts { users, students })
    }
}

/// Serve the statistics snapshot, cache-aside.
///
/// A cache backend failure degrades to querying the source directly; an
/// authoritative-store failure propagates. `cache: None` (no backend
/// configured) behaves as a permanent miss.
pub async fn get_stats(
    cache: Option<&dyn CacheStore>,
    source: &dyn StatsSource,
) -> Result<StatsOutcome, AppError> {
    if let Some(cache) = cache {
        match cache.get(STATS_CACHE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<StatsSnapshot>(&raw) {
                Ok(snapshot) => {
                    debug!(key = STATS_CACHE_KEY, "stats cache hit");
                    return Ok(StatsOutcome {
                        snapshot,
                        from_cache: true,
                    });
                }
                Err(e) => {
                    // Corrupt entry: recompute and overwrite it below.
                    warn!(key = STATS_CACHE_KEY, error = %e, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {
                debug!(key = STATS_CACHE_KEY, "stats cache miss");
            }
            Err(e) => {
                warn!(key = STATS_CACHE_KEY, error = %e, "stats cache unreachable, querying store directly");
            }
        }
    }

    let counts = source.counts().await?;
    let snapshot = StatsSnapshot {
        total_users: counts.users,
        total_students: counts.students,
        active_classes: ACTIVE_CLASSES_PLACEHOLDER,
        generated_at: OffsetDateTime::now_utc(),
    };

    if let Some(cache) = cache {
        match serde_json::to_string(&snapshot) {
            Ok(raw) => {
                if let Err(e) = cache.set_ex(STATS_CACHE_KEY, &raw, STATS_CACHE_TTL).await {
                    warn!(key = STATS_CACHE_KEY, error = %e, "failed to populate stats cache");
                }
            }
            Err(e) => {
                return Err(AppError::internal(format!(
                    "failed to serialize stats snapshot: {e}"
                )));
            }
        }
    }

    Ok(StatsOutcome {
        snapshot,
        from_cache: false,
    })
}

/// Unconditionally drop the cached snapshot so the next read recomputes.
///
/// Must be called only after the mutation that changed the counts has
/// committed. A backend failure here is logged and swallowed: the entry
/// still dies at its TTL, which is the accepted staleness bound.
pub async fn invalidate(cache: Option<&dyn CacheStore>) {
    let Some(cache) = cache else {
        return;
    };
    match cache.del(STATS_CACHE_KEY).await {
        Ok(()) => debug!(key = STATS_CACHE_KEY, "stats cache invalidated"),
        Err(e) => {
            warn!(key = STATS_CACHE_KEY, error = %e, "stats cache invalidation failed, entry expires at TTL");
        }
    }
}
