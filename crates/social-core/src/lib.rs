//! # social-core
//!
//! Domain layer containing entities, domain errors, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, DailyReactionStats, NewComment, NewPost, NewUser, Post, PostReaction,
    ReactionChange, ReactionKind, ReactionOutcome, User, UserActivity, MAX_COMMENT_LENGTH,
    MAX_POST_LENGTH,
};
pub use error::DomainError;
pub use traits::{
    AnalyticsRepository, CommentRepository, PostRepository, ReactionRepository, RepoResult,
    UserRepository,
};
