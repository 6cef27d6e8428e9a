//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 5, max = 16, message = "Username must be 5-16 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 250, message = "Email must be at most 250 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 10, message = "Password must be 6-10 characters"))]
    pub password: String,
}

/// Login form. `username` carries the email address.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request carrying only an email address
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmailRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 250, message = "Email must be at most 250 characters")
    )]
    pub email: String,
}

/// New password, entered twice
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, max = 10, message = "Password must be 6-10 characters"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub r_new_password: String,
}

// ============================================================================
// Post Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2000, message = "Post must be 1-2000 characters"))]
    pub post: String,
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    pub post_id: i64,

    #[validate(length(
        min = 1,
        max = 300,
        message = "Comment must be 1-300 characters"
    ))]
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    pub comment_id: i64,
    pub post_id: i64,

    #[validate(length(
        min = 1,
        max = 300,
        message = "Comment must be 1-300 characters"
    ))]
    pub comment: String,
}

// ============================================================================
// Analytics Requests
// ============================================================================

/// Inclusive date range, `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
