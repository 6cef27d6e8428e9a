//! User entity - represents a registered account

use chrono::{DateTime, Utc};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
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

impl User {
    /// Check whether the account may log in, given the confirmation policy
    pub fn can_login(&self, require_confirmation: bool) -> bool {
        self.is_active && (self.confirmed || !require_confirmation)
    }

    /// Snapshot of the activity timestamps
    pub fn activity(&self) -> UserActivity {
        UserActivity {
            user_id: self.id,
            last_login_at: self.last_login_at,
            last_request_at: self.last_request_at,
        }
    }
}

/// Data needed to register a user. The id and timestamps come from the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email: email.trim().to_lowercase(),
            password_hash,
        }
    }
}

/// Last login / last request timestamps of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserActivity {
    pub user_id: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_request_at: Option<DateTime<Utc>>,
}
