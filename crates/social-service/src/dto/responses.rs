//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output and `ToSchema`
//! for the OpenAPI document.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Access and refresh tokens
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user fields, returned by signup
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// The authenticated user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Last login and last request times of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub user_id: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_request_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub post: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
}

/// Page of posts, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

/// Post counters after a reaction change
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReactionResponse {
    pub post_id: i64,
    pub post: String,
    pub likes: i32,
    pub dislikes: i32,
    /// Caller's reaction after the change: `like`, `dislike` or null
    pub reaction: Option<String>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page of comments, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentUpdatedResponse {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment: String,
    pub message: String,
}

// ============================================================================
// Analytics Responses
// ============================================================================

/// Reaction counts of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsEntry {
    pub date: NaiveDate,
    pub likes: i32,
    pub dislikes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub analytics_data: Vec<AnalyticsEntry>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let label = |healthy: bool| if healthy { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                redis: label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_serialization() {
        let response = AnalyticsResponse {
            analytics_data: vec![AnalyticsEntry {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                likes: 2,
                dislikes: 1,
            }],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["analytics_data"][0]["date"], "2024-03-05");
        assert_eq!(json["analytics_data"][0]["likes"], 2);

        let back: AnalyticsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true, true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(true, false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.redis, "unhealthy");
    }
}
