//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    Comment, DailyReactionStats, NewComment, NewPost, NewUser, Post, PostReaction,
    ReactionKind, ReactionOutcome, User, UserActivity,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken (case-insensitive)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Mark the email as confirmed
    async fn confirm_email(&self, id: i64) -> RepoResult<()>;

    /// Store (or clear with `None`) the currently valid refresh token
    async fn set_refresh_token(&self, id: i64, token: Option<&str>) -> RepoResult<()>;

    /// Get the currently valid refresh token
    async fn get_refresh_token(&self, id: i64) -> RepoResult<Option<String>>;

    /// Set last_login_at to now
    async fn record_login(&self, id: i64) -> RepoResult<()>;

    /// Set last_request_at to now
    async fn touch_last_request(&self, id: i64) -> RepoResult<()>;

    /// Get login/request timestamps
    async fn get_activity(&self, id: i64) -> RepoResult<Option<UserActivity>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Post>>;

    /// Create a new post
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Delete a post owned by `user_id`. Comments, reactions and analytics
    /// rows cascade.
    ///
    /// Fails with `PostNotFound` or `NotPostOwner`.
    async fn delete_owned(&self, id: i64, user_id: i64) -> RepoResult<()>;

    /// Newest posts first, optionally strictly older than `before`
    async fn list_recent(&self, before: Option<i64>, limit: i64) -> RepoResult<Vec<Post>>;

    /// Newest posts of one user
    async fn list_by_user(
        &self,
        user_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> RepoResult<Vec<Post>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction of a user on a post
    async fn find(&self, post_id: i64, user_id: i64) -> RepoResult<Option<PostReaction>>;

    /// Set the user's reaction on a post and adjust the post counters in the
    /// same transaction.
    ///
    /// - no reaction: insert, counter +1
    /// - opposite reaction: switch, counters +1/-1
    /// - same reaction: `AlreadyReacted`
    async fn react(
        &self,
        post_id: i64,
        user_id: i64,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome>;

    /// Remove the user's reaction and decrement the matching counter
    async fn remove(&self, post_id: i64, user_id: i64) -> RepoResult<ReactionOutcome>;

    /// Count reaction rows of a post as (likes, dislikes)
    async fn count_for_post(&self, post_id: i64) -> RepoResult<(i64, i64)>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Update the text of a comment on `post_id` written by `user_id`.
    /// Returns `None` when no such comment exists.
    async fn update_owned(
        &self,
        id: i64,
        post_id: i64,
        user_id: i64,
        text: &str,
    ) -> RepoResult<Option<Comment>>;

    /// Delete a comment written by `user_id`. Returns false if nothing matched.
    async fn delete_owned(&self, id: i64, user_id: i64) -> RepoResult<bool>;

    /// Newest comments of a post first
    async fn list_for_post(
        &self,
        post_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Analytics Repository
// ============================================================================

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Recompute daily rows for every day from `since` on. Returns rows written.
    async fn aggregate_since(&self, since: NaiveDate) -> RepoResult<u64>;

    /// Daily rows of a post in `[start, end]`, ordered by day
    async fn daily_stats(
        &self,
        post_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<DailyReactionStats>>;
}
