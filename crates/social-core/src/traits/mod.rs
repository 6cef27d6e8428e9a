//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AnalyticsRepository, CommentRepository, PostRepository, ReactionRepository, RepoResult,
    UserRepository,
};
