//! Pagination extractor
//!
//! Extracts `before` id cursor and `limit` from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::response::ApiError;

/// Default page size
pub const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
pub const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Return items with an id lower than this one
    #[serde(default)]
    pub before: Option<String>,
    /// Page size (1-100, default 50)
    #[serde(default)]
    pub limit: Option<String>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub before: Option<i64>,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let before = params
            .before
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'before' cursor format"))
            })
            .transpose()?;

        let limit = params
            .limit
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'limit' format"))
            })
            .transpose()?
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        Ok(Pagination { before, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Pagination::try_from(params)
    }
}
