//! Database models - SQLx-compatible structs for PostgreSQL tables

mod analytics;
mod comment;
mod post;
mod reaction;
mod user;

pub use analytics::DailyStatsModel;
pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::PostReactionModel;
pub use user::{UserActivityModel, UserModel};
