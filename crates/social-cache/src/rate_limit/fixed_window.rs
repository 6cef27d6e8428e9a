//! Fixed-window request counter.
//!
//! Each client gets one Redis counter per window. The first request of a
//! window creates the key with the window as its TTL, every request
//! increments it, and a request is rejected once the count passes the limit.
//!
//! Redis trouble never blocks traffic: on error or timeout the request is
//! allowed and a warning is logged.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::pool::{RedisResult, SharedRedisPool};

/// Key prefix for rate limit counters
pub const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit";

/// Who a request is counted against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RateLimitKey {
    /// Authenticated user
    User(i64),
    /// Anonymous client, by IP address
    Ip(String),
}

impl RateLimitKey {
    /// Redis key holding this client's counter
    #[must_use]
    pub fn redis_key(&self) -> String {
        match self {
            Self::User(id) => format!("{RATE_LIMIT_KEY_PREFIX}:user:{id}"),
            Self::Ip(ip) => format!("{RATE_LIMIT_KEY_PREFIX}:ip:{ip}"),
        }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Ip(ip) => write!(f, "ip:{ip}"),
        }
    }
}

/// Result of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Seconds until the current window resets
    pub reset_after: u64,
}

impl RateLimitDecision {
    /// Decision for a counter value within a window
    #[must_use]
    pub fn from_count(count: u64, ttl: u64, limit: u32) -> Self {
        let limit_u64 = u64::from(limit);
        let remaining = limit_u64.saturating_sub(count);
        Self {
            allowed: count <= limit_u64,
            limit,
            remaining: u32::try_from(remaining).unwrap_or(limit),
            reset_after: ttl,
        }
    }

    /// Decision used when the counter could not be read
    #[must_use]
    pub fn fail_open(limit: u32, window_seconds: u64) -> Self {
        Self {
            allowed: true,
            limit,
            remaining: limit,
            reset_after: window_seconds,
        }
    }
}

/// Redis-backed fixed-window rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    pool: SharedRedisPool,
    max_requests: u32,
    window_seconds: u64,
    redis_timeout: Duration,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window_seconds", &self.window_seconds)
            .field("redis_timeout", &self.redis_timeout)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    pub fn new(
        pool: SharedRedisPool,
        max_requests: u32,
        window_seconds: u64,
        redis_timeout_ms: u64,
    ) -> Self {
        Self {
            pool,
            max_requests,
            window_seconds: window_seconds.max(1),
            redis_timeout: Duration::from_millis(redis_timeout_ms),
        }
    }

    pub fn from_config(pool: SharedRedisPool, config: &social_common::RateLimitConfig) -> Self {
        Self::new(
            pool,
            config.max_requests,
            config.window_seconds,
            config.redis_timeout_ms,
        )
    }

    #[must_use]
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    #[must_use]
    pub fn window_seconds(&self) -> u64 {
        self.window_seconds
    }

    /// Count one request for `key` and decide whether it may proceed
    pub async fn check(&self, key: &RateLimitKey) -> RateLimitDecision {
        match tokio::time::timeout(self.redis_timeout, self.try_check(key)).await {
            Ok(Ok(decision)) => {
                if !decision.allowed {
                    debug!(client = %key, limit = decision.limit, "Rate limit exceeded");
                }
                decision
            }
            Ok(Err(e)) => {
                warn!(client = %key, error = %e, "Rate limiter Redis error, allowing request");
                RateLimitDecision::fail_open(self.max_requests, self.window_seconds)
            }
            Err(_) => {
                warn!(
                    client = %key,
                    timeout_ms = self.redis_timeout.as_millis(),
                    "Rate limiter Redis timeout, allowing request"
                );
                RateLimitDecision::fail_open(self.max_requests, self.window_seconds)
            }
        }
    }

    /// Count one request, surfacing Redis errors
    pub async fn try_check(&self, key: &RateLimitKey) -> RedisResult<RateLimitDecision> {
        let (count, ttl) = self
            .pool
            .incr_window(&key.redis_key(), self.window_seconds)
            .await?;

        Ok(RateLimitDecision::from_count(count, ttl, self.max_requests))
    }
}
