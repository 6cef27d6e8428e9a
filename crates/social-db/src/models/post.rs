//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub user_id: i64,
    pub post: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
}
