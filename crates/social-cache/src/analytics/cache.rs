//! Short-lived cache for per-post analytics queries.
//!
//! Entries are keyed by post and date range. The aggregation job clears the
//! whole namespace after each run so stale ranges are never served longer
//! than one job interval. A TTL of zero disables the cache.
//!
//! Every Redis call is bounded by the same timeout as the rate limiter, so an
//! unreachable Redis turns into a miss instead of a stalled request.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::pool::{RedisPoolError, RedisResult, SharedRedisPool};

/// Key prefix for cached analytics results
pub const ANALYTICS_KEY_PREFIX: &str = "analytics:post";

const SCAN_BATCH: usize = 100;

/// Analytics result cache
#[derive(Debug, Clone)]
pub struct AnalyticsCache {
    pool: SharedRedisPool,
    ttl_seconds: u64,
    redis_timeout: Duration,
}

impl AnalyticsCache {
    pub fn new(pool: SharedRedisPool, ttl_seconds: u64, redis_timeout_ms: u64) -> Self {
        Self {
            pool,
            ttl_seconds,
            redis_timeout: Duration::from_millis(redis_timeout_ms),
        }
    }

    async fn bounded<T>(&self, op: impl Future<Output = RedisResult<T>>) -> RedisResult<T> {
        tokio::time::timeout(self.redis_timeout, op)
            .await
            .map_err(|_| RedisPoolError::Timeout(self.redis_timeout.as_millis()))?
    }

    #[must_use]
    pub fn key(post_id: i64, start: NaiveDate, end: NaiveDate) -> String {
        format!("{ANALYTICS_KEY_PREFIX}:{post_id}:{start}:{end}")
    }

    /// Cached result for a range, if any. Redis errors count as a miss.
    pub async fn get<V: DeserializeOwned>(
        &self,
        post_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<V> {
        if self.ttl_seconds == 0 {
            return None;
        }

        let key = Self::key(post_id, start, end);
        match self.bounded(self.pool.get_value(&key)).await {
            Ok(value) => {
                if value.is_some() {
                    debug!(%key, "Analytics cache hit");
                }
                value
            }
            Err(e) => {
                warn!(%key, error = %e, "Analytics cache read failed");
                None
            }
        }
    }

    /// Store a result. Failures are logged and otherwise ignored.
    pub async fn put<V: Serialize + Sync>(
        &self,
        post_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        value: &V,
    ) {
        if self.ttl_seconds == 0 {
            return;
        }

        let key = Self::key(post_id, start, end);
        if let Err(e) = self
            .bounded(self.pool.set(&key, value, Some(self.ttl_seconds)))
            .await
        {
            warn!(%key, error = %e, "Analytics cache write failed");
        }
    }

    /// Drop every cached analytics entry. Returns the number of keys removed.
    pub async fn invalidate_all(&self) -> RedisResult<i32> {
        if self.ttl_seconds == 0 {
            return Ok(0);
        }
        self.delete_matching(&format!("{ANALYTICS_KEY_PREFIX}:*"))
            .await
    }

    /// Drop the cached entries of one post
    pub async fn invalidate_post(&self, post_id: i64) -> RedisResult<i32> {
        if self.ttl_seconds == 0 {
            return Ok(0);
        }
        self.delete_matching(&format!("{ANALYTICS_KEY_PREFIX}:{post_id}:*"))
            .await
    }

    async fn delete_matching(&self, pattern: &str) -> RedisResult<i32> {
        self.bounded(async {
            let keys = self.pool.scan_keys(pattern, SCAN_BATCH).await?;
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            self.pool.delete_many(&refs).await
        })
        .await
    }
}
