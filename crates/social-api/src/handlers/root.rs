//! Root endpoint

use axum::Json;

use crate::response::MessageResponse;

pub const WELCOME_MESSAGE: &str = "Welcome to the Social Network API";

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Welcome message", body = MessageResponse))
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new(WELCOME_MESSAGE))
}
