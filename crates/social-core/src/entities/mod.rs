//! Domain entities - core business objects

mod analytics;
mod comment;
mod post;
mod reaction;
mod user;

pub use analytics::DailyReactionStats;
pub use comment::{Comment, NewComment, MAX_COMMENT_LENGTH};
pub use post::{NewPost, Post, MAX_POST_LENGTH};
pub use reaction::{PostReaction, ReactionChange, ReactionKind, ReactionOutcome};
pub use user::{NewUser, User, UserActivity};
