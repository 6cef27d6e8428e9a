//! Route definitions
//!
//! Routes are grouped by domain. Health routes are kept apart so they bypass
//! the rate limiter.

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::handlers::{analytics, auth, comments, health, posts, root, users};
use crate::openapi::{ApiDoc, OPENAPI_JSON_PATH};
use crate::state::AppState;

/// All rate-limited routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root::index))
        .route(OPENAPI_JSON_PATH, get(|| async { Json(ApiDoc::document()) }))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh_token", get(auth::refresh_token))
        .route("/logout", post(auth::logout))
        .route("/request_email", post(auth::request_email))
        .route("/confirmed_email/:token", get(auth::confirmed_email))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .route(
            "/analytics/post/:post_id/likes-dislikes",
            get(analytics::post_likes_dislikes),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::me))
        .route("/users/reset_password_email", post(users::reset_password_email))
        .route("/users/reset_password/:token", post(users::reset_password))
        .route("/users/user/:user_id/activity", get(users::user_activity))
        .route("/users/user/:user_id/posts", get(users::user_posts))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route(
            "/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/posts/:post_id/like", post(posts::like_post))
        .route("/posts/:post_id/unlike", post(posts::unlike_post))
        .route("/posts/:post_id/reaction", delete(posts::remove_reaction))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route("/comments/update", put(comments::update_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route(
            "/comments/posts/:post_id/comments",
            get(comments::list_comments),
        )
}
