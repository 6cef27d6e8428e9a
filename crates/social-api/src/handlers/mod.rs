//! HTTP handlers
//!
//! Handlers translate requests into service calls and service results into
//! responses. Each one carries its OpenAPI description.

pub mod analytics;
pub mod auth;
pub mod comments;
pub mod health;
pub mod posts;
pub mod root;
pub mod users;
