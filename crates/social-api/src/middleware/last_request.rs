//! Last-request tracking
//!
//! Stamps `last_request_at` for callers with a valid access token once the
//! handler has produced its response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use social_service::UserService;
use tracing::warn;

use crate::extractors::bearer_token;
use crate::state::AppState;

pub async fn track_last_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let user_id = bearer_token(request.headers()).and_then(|t| state.user_id_from_token(t));

    let response = next.run(request).await;

    if let Some(user_id) = user_id {
        if let Err(e) = UserService::new(state.service_context())
            .touch_last_request(user_id)
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to record last request");
        }
    }

    response
}
