//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.

mod analytics;
mod comment;
mod error;
mod post;
mod reaction;
mod user;

pub use analytics::PgAnalyticsRepository;
pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
