//! Analytics handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use social_service::dto::{AnalyticsQuery, AnalyticsResponse};
use social_service::AnalyticsService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiError, ApiResult, ErrorBody};
use crate::state::AppState;

/// Daily likes and dislikes of an own post
#[utoipa::path(
    get,
    path = "/api/analytics/post/{post_id}/likes-dislikes",
    tag = "analytics",
    security(("bearer_auth" = [])),
    params(("post_id" = i64, Path, description = "Post id"), AnalyticsQuery),
    responses(
        (status = 200, description = "Per-day counts", body = AnalyticsResponse),
        (status = 400, description = "Invalid date range", body = ErrorBody),
        (status = 403, description = "Not the author", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn post_likes_dislikes(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<i64>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<AnalyticsResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let response = AnalyticsService::new(state.service_context())
        .post_likes_dislikes(post_id, auth.user_id, query)
        .await?;
    Ok(Json(response))
}
