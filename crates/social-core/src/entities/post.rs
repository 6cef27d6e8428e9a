//! Post entity

use chrono::{DateTime, Utc};

use super::reaction::ReactionKind;

/// Maximum post length in characters
pub const MAX_POST_LENGTH: usize = 2000;

/// A post owned by a single user, with denormalized reaction counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub post: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check if the given user owns this post
    #[inline]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Counter value for one polarity
    pub fn count(&self, kind: ReactionKind) -> i32 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Dislike => self.dislikes,
        }
    }

    /// Net score (likes minus dislikes)
    pub fn score(&self) -> i32 {
        self.likes - self.dislikes
    }
}

/// Data needed to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub post: String,
}

impl NewPost {
    pub fn new(user_id: i64, post: String) -> Self {
        Self { user_id, post }
    }
}
