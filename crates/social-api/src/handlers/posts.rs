//! Post and reaction handlers

use axum::{extract::State, Json};
use social_service::dto::{CreatePostRequest, PostListResponse, PostResponse, ReactionResponse};
use social_service::{PostService, ReactionService};

use crate::extractors::{AuthUser, IdPath, Pagination, PaginationParams, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Publish a post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let response = PostService::new(state.service_context())
        .create_post(auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Feed of all posts, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PaginationParams),
    responses((status = 200, description = "Posts", body = PostListResponse))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let response = PostService::new(state.service_context())
        .list_feed(pagination.before, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// One post
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<Json<PostResponse>> {
    let response = PostService::new(state.service_context())
        .get_post(post_id)
        .await?;
    Ok(Json(response))
}

/// Delete an own post with its comments and reactions
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the author", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<NoContent> {
    PostService::new(state.service_context())
        .delete_post(post_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Like a post
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/like",
    tag = "reactions",
    security(("bearer_auth" = [])),
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Reaction stored", body = ReactionResponse),
        (status = 400, description = "Already liked", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<Json<ReactionResponse>> {
    let response = ReactionService::new(state.service_context())
        .like(post_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Dislike a post
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/unlike",
    tag = "reactions",
    security(("bearer_auth" = [])),
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Reaction stored", body = ReactionResponse),
        (status = 400, description = "Already disliked", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<Json<ReactionResponse>> {
    let response = ReactionService::new(state.service_context())
        .dislike(post_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Withdraw the caller's reaction
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/reaction",
    tag = "reactions",
    security(("bearer_auth" = [])),
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Reaction removed", body = ReactionResponse),
        (status = 404, description = "Post or reaction not found", body = ErrorBody)
    )
)]
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<Json<ReactionResponse>> {
    let response = ReactionService::new(state.service_context())
        .remove_reaction(post_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
