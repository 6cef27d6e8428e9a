//! User model -> entity mappers

use social_core::entities::{User, UserActivity};

use crate::models::{UserActivityModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            confirmed: model.confirmed,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_login_at: model.last_login_at,
            last_request_at: model.last_request_at,
        }
    }
}

impl From<UserActivityModel> for UserActivity {
    fn from(model: UserActivityModel) -> Self {
        UserActivity {
            user_id: model.id,
            last_login_at: model.last_login_at,
            last_request_at: model.last_request_at,
        }
    }
}
