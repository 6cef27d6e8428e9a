//! Reaction entity - a user's like or dislike on a post

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post::Post;
use crate::error::DomainError;

/// Polarity of a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Database / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// The other polarity
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::ValidationError(format!(
                "Unknown reaction: {other}"
            ))),
        }
    }
}

/// Reaction row. At most one exists per (user, post).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReaction {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a reaction mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Created,
    Switched,
    Removed,
}

/// Result of a reaction mutation: the post with its updated counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub post: Post,
    pub change: ReactionChange,
    /// Reaction held by the user after the change
    pub current: Option<ReactionKind>,
}
