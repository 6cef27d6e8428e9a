//! Post reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for post_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct PostReactionModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub reaction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
