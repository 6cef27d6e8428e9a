//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and path ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{bearer_token, AuthUser, BearerToken};
pub use pagination::{Pagination, PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use path::IdPath;
pub use validated::{ValidatedForm, ValidatedJson};
