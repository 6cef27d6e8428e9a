//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{
    ActivityResponse, CurrentUserResponse, EmailRequest, MessageResponse, PostListResponse,
    ResetPasswordRequest,
};
use social_service::{PostService, UserService};

use crate::extractors::{AuthUser, IdPath, Pagination, PaginationParams, ValidatedJson};
use crate::response::{ApiResult, ErrorBody};
use crate::state::AppState;

/// Profile of the caller
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = UserService::new(state.service_context())
        .get_me(auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Send a password reset link
#[utoipa::path(
    post,
    path = "/api/users/reset_password_email",
    tag = "users",
    request_body = EmailRequest,
    responses((status = 200, description = "Request accepted", body = MessageResponse))
)]
pub async fn reset_password_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let response = UserService::new(state.service_context())
        .request_password_reset(&request.email)
        .await?;
    Ok(Json(response))
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/api/users/reset_password/{token}",
    tag = "users",
    params(("token" = String, Path, description = "Password reset token")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid token or passwords", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let response = UserService::new(state.service_context())
        .reset_password(&token, request)
        .await?;
    Ok(Json(response))
}

/// Last login and last request times of a user
#[utoipa::path(
    get,
    path = "/api/users/user/{user_id}/activity",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Activity", body = ActivityResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn user_activity(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<i64>,
) -> ApiResult<Json<ActivityResponse>> {
    let response = UserService::new(state.service_context())
        .get_activity(user_id)
        .await?;
    Ok(Json(response))
}

/// Posts of one user, newest first
#[utoipa::path(
    get,
    path = "/api/users/user/{user_id}/posts",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id"), PaginationParams),
    responses(
        (status = 200, description = "Posts", body = PostListResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn user_posts(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<i64>,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let response = PostService::new(state.service_context())
        .list_user_posts(user_id, pagination.before, pagination.limit)
        .await?;
    Ok(Json(response))
}
