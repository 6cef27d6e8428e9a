//! User database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub confirmed: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_request_at: Option<DateTime<Utc>>,
}

/// Activity columns of a user
#[derive(Debug, Clone, FromRow)]
pub struct UserActivityModel {
    pub id: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_request_at: Option<DateTime<Utc>>,
}
