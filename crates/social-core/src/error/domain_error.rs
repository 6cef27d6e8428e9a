//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ReactionKind;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(i64),

    #[error("User not found")]
    EmailNotFound(String),

    #[error("Post not found")]
    PostNotFound(i64),

    #[error("Comment not found or doesn't belong to the current user")]
    CommentNotFound(i64),

    #[error("Reaction not found")]
    ReactionNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("date_from must be before date_to")]
    InvalidDateRange,

    #[error("{}", already_reacted_message(.0))]
    AlreadyReacted(ReactionKind),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Unauthorized access: User does not own the post.")]
    NotPostOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Account already exists")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn already_reacted_message(kind: &ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "User has already liked this post",
        ReactionKind::Dislike => "User has already unliked this post",
    }
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::EmailNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ReactionNotFound => "UNKNOWN_REACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::AlreadyReacted(_) => "ALREADY_REACTED",

            // Authorization
            Self::NotPostOwner => "NOT_POST_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::EmailNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ReactionNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidDateRange | Self::AlreadyReacted(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}
