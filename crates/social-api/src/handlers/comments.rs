//! Comment handlers

use axum::{extract::State, Json};
use social_service::dto::{
    CommentListResponse, CommentResponse, CommentUpdatedResponse, CreateCommentRequest,
    UpdateCommentRequest,
};
use social_service::CommentService;

use crate::extractors::{AuthUser, IdPath, Pagination, PaginationParams, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comments",
    security(("bearer_auth" = [])),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let response = CommentService::new(state.service_context())
        .create_comment(auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Edit an own comment
#[utoipa::path(
    put,
    path = "/api/comments/update",
    tag = "comments",
    security(("bearer_auth" = [])),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentUpdatedResponse),
        (status = 404, description = "Comment not found or not owned", body = ErrorBody)
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentUpdatedResponse>> {
    let response = CommentService::new(state.service_context())
        .update_comment(auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete an own comment
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("comment_id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found or not owned", body = ErrorBody)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<i64>,
) -> ApiResult<NoContent> {
    CommentService::new(state.service_context())
        .delete_comment(comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Comments of a post, newest first
#[utoipa::path(
    get,
    path = "/api/comments/posts/{post_id}/comments",
    tag = "comments",
    params(("post_id" = i64, Path, description = "Post id"), PaginationParams),
    responses(
        (status = 200, description = "Comments, possibly empty", body = CommentListResponse),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(post_id): IdPath<i64>,
    pagination: Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let response = CommentService::new(state.service_context())
        .list_comments(post_id, pagination.before, pagination.limit)
        .await?;
    Ok(Json(response))
}
