//! Cached analytics query results.

mod cache;

pub use cache::{AnalyticsCache, ANALYTICS_KEY_PREFIX};
