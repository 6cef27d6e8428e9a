//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and is created per call.

pub mod analytics;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{
    AnalyticsSettings, AuthSettings, ServiceContext, ServiceContextBuilder, ServiceSettings,
};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::ReactionService;
pub use user::UserService;
