//! Comment entity - text attached to a post by its author

use chrono::{DateTime, Utc};

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 300;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Check if the given user wrote this comment
    #[inline]
    pub fn is_author(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Check if the comment was edited after creation
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Data needed to create a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
}

impl NewComment {
    pub fn new(post_id: i64, user_id: i64, comment: String) -> Self {
        Self {
            post_id,
            user_id,
            comment,
        }
    }
}
