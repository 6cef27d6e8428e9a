//! Redis-backed rate limiting
//!
//! Requests with a valid access token are counted per user, the rest per
//! client IP. Every response that passed the check carries the
//! `x-ratelimit-*` headers.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use social_cache::{RateLimitDecision, RateLimitKey};
use social_common::AppError;
use tracing::warn;

use crate::extractors::bearer_token;
use crate::response::ApiError;
use crate::state::AppState;

pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Client address: first `x-forwarded-for` entry, then the peer address
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Bucket a request is counted against
pub fn rate_limit_key(state: &AppState, request: &Request) -> RateLimitKey {
    if let Some(user_id) = bearer_token(request.headers()).and_then(|t| state.user_id_from_token(t))
    {
        return RateLimitKey::User(user_id);
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    RateLimitKey::Ip(client_ip(request.headers(), peer))
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(RATE_LIMIT_LIMIT_HEADER, HeaderValue::from(decision.limit));
    headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from(decision.remaining));
    headers.insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from(decision.reset_after));
}

/// Rate limit middleware. A no-op when the limiter is disabled.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(limiter) = state.service_context().rate_limiter() else {
        return next.run(request).await;
    };

    let key = rate_limit_key(&state, &request);
    let decision = limiter.check(&key).await;

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!(%key, limit = decision.limit, "Rate limit exceeded");
        ApiError::from(AppError::RateLimitExceeded).into_response()
    };

    apply_headers(response.headers_mut(), &decision);
    response
}
