//! Test fixtures and data generators
//!
//! Accounts use random suffixes so repeated runs against the same database
//! never collide.

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::helpers::{assert_json, TestServer};

/// Password accepted by the signup rules (6-10 characters)
pub const TEST_PASSWORD: &str = "secret123";

/// Random 12 character suffix
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let username = format!("u{}", unique_suffix());
        Self {
            email: format!("{username}@example.com"),
            username,
            password: TEST_PASSWORD.to_string(),
        }
    }
}

/// Login form fields; `username` carries the email
#[derive(Debug, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            username: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct ActivityBody {
    pub user_id: i64,
    pub last_login_at: Option<String>,
    pub last_request_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub id: i64,
    pub user_id: i64,
    pub post: String,
    pub likes: i32,
    pub dislikes: i32,
}

#[derive(Debug, Deserialize)]
pub struct PostListBody {
    pub posts: Vec<PostBody>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub post_id: i64,
    pub likes: i32,
    pub dislikes: i32,
    pub reaction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentListBody {
    pub comments: Vec<CommentBody>,
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdatedBody {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsEntryBody {
    pub date: String,
    pub likes: i64,
    pub dislikes: i64,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsBody {
    pub analytics_data: Vec<AnalyticsEntryBody>,
}

/// A signed-up and logged-in account
#[derive(Debug)]
pub struct TestUser {
    pub id: i64,
    pub signup: SignupRequest,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestUser {
    pub async fn create(server: &TestServer) -> Result<Self> {
        let signup = SignupRequest::unique();

        let response = server.post("/auth/signup", &signup).await?;
        let user: UserBody = assert_json(response, StatusCode::CREATED).await?;

        let response = server
            .post_form("/auth/login", &LoginForm::from_signup(&signup))
            .await?;
        let tokens: TokenBody = assert_json(response, StatusCode::OK).await?;

        Ok(Self {
            id: user.id,
            signup,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    pub async fn create_post(&self, server: &TestServer, text: &str) -> Result<PostBody> {
        let response = server
            .post_auth("/api/posts", &self.access_token, &serde_json::json!({ "post": text }))
            .await?;
        assert_json(response, StatusCode::CREATED).await
    }
}
