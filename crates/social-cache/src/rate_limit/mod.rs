//! Request rate limiting backed by Redis counters.

mod fixed_window;

pub use fixed_window::{RateLimitDecision, RateLimitKey, RateLimiter, RATE_LIMIT_KEY_PREFIX};
