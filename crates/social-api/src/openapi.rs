//! OpenAPI document

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::response::{ErrorBody, ErrorDetail};
use social_service::dto::{
    ActivityResponse, AnalyticsEntry, AnalyticsResponse, CommentListResponse, CommentResponse,
    CommentUpdatedResponse, CreateCommentRequest, CreatePostRequest, CurrentUserResponse,
    EmailRequest, HealthChecks, HealthResponse, LoginForm, MessageResponse, PostListResponse,
    PostResponse, ReactionResponse, ReadinessResponse, ResetPasswordRequest, SignupRequest,
    TokenResponse, UpdateCommentRequest, UserResponse,
};

/// Where the JSON document is served
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Network API",
        version = "0.1.0",
        description = "Users, posts, reactions, comments and per-post analytics."
    ),
    paths(
        handlers::root::index,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::refresh_token,
        handlers::auth::logout,
        handlers::auth::request_email,
        handlers::auth::confirmed_email,
        handlers::users::me,
        handlers::users::reset_password_email,
        handlers::users::reset_password,
        handlers::users::user_activity,
        handlers::users::user_posts,
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::delete_post,
        handlers::posts::like_post,
        handlers::posts::unlike_post,
        handlers::posts::remove_reaction,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::comments::list_comments,
        handlers::analytics::post_likes_dislikes,
    ),
    components(schemas(
        ErrorBody,
        ErrorDetail,
        MessageResponse,
        SignupRequest,
        LoginForm,
        EmailRequest,
        ResetPasswordRequest,
        CreatePostRequest,
        CreateCommentRequest,
        UpdateCommentRequest,
        TokenResponse,
        UserResponse,
        CurrentUserResponse,
        ActivityResponse,
        PostResponse,
        PostListResponse,
        ReactionResponse,
        CommentResponse,
        CommentListResponse,
        CommentUpdatedResponse,
        AnalyticsEntry,
        AnalyticsResponse,
        HealthResponse,
        ReadinessResponse,
        HealthChecks,
    )),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "auth", description = "Signup, login, tokens and email confirmation"),
        (name = "users", description = "Profiles, password reset and activity"),
        (name = "posts", description = "Posts"),
        (name = "reactions", description = "Likes and dislikes"),
        (name = "comments", description = "Comments on posts"),
        (name = "analytics", description = "Per-day reaction counts"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The generated document
    pub fn document() -> utoipa::openapi::OpenApi {
        Self::openapi()
    }
}

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
