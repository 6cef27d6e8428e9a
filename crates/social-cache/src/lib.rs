//! # social-cache
//!
//! Redis layer for request rate limiting and short-lived analytics results.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Rate Limiting**: Fixed-window counters per user or client IP, failing open
//! - **Analytics Cache**: JSON-encoded analytics query results with a TTL
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{create_shared_pool, RateLimiter, RateLimitKey, RedisPoolConfig};
//!
//! let pool = create_shared_pool(RedisPoolConfig::default())?;
//! let limiter = RateLimiter::new(pool, 100, 60, 100);
//!
//! let decision = limiter.check(&RateLimitKey::Ip("10.0.0.1".into())).await;
//! if !decision.allowed {
//!     // reply 429
//! }
//! ```

pub mod analytics;
pub mod pool;
pub mod rate_limit;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

pub use analytics::{AnalyticsCache, ANALYTICS_KEY_PREFIX};
pub use rate_limit::{RateLimitDecision, RateLimitKey, RateLimiter, RATE_LIMIT_KEY_PREFIX};
