//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_common::TokenPair;
use social_core::entities::{
    Comment, DailyReactionStats, Post, ReactionOutcome, User, UserActivity,
};

use super::responses::{
    ActivityResponse, AnalyticsEntry, CommentResponse, CurrentUserResponse, PostResponse,
    ReactionResponse, TokenResponse, UserResponse,
};

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            confirmed: user.confirmed,
            created_at: user.created_at,
        }
    }
}

impl From<UserActivity> for ActivityResponse {
    fn from(activity: UserActivity) -> Self {
        Self {
            user_id: activity.user_id,
            last_login_at: activity.last_login_at,
            last_request_at: activity.last_request_at,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            post: post.post,
            likes: post.likes,
            dislikes: post.dislikes,
            created_at: post.created_at,
        }
    }
}

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            post_id: outcome.post.id,
            post: outcome.post.post,
            likes: outcome.post.likes,
            dislikes: outcome.post.dislikes,
            reaction: outcome.current.map(|kind| kind.as_str().to_string()),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            comment: comment.comment,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================================================
// Analytics Mappers
// ============================================================================

impl From<DailyReactionStats> for AnalyticsEntry {
    fn from(stats: DailyReactionStats) -> Self {
        Self {
            date: stats.day,
            likes: stats.likes,
            dislikes: stats.dislikes,
        }
    }
}
