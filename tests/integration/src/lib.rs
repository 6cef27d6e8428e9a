//! Integration test utilities for the social network API
//!
//! Spawns the real router on an ephemeral port against PostgreSQL and Redis
//! and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
