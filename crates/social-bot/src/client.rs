//! Thin HTTP client over the public API

use anyhow::{bail, Context};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Page size used when walking the feed
const FEED_PAGE_SIZE: i64 = 100;

/// Error code returned when the same reaction is repeated
const ALREADY_REACTED_CODE: &str = "ALREADY_REACTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    AlreadyRegistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    AlreadyLiked,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: String,
}

#[derive(Deserialize)]
struct PostBody {
    id: i64,
}

#[derive(Deserialize)]
struct PostListBody {
    posts: Vec<PostBody>,
}

/// Email address of a bot account
pub fn bot_email(username: &str) -> String {
    format!("{username}@example.com")
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn failure(what: &str, response: Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::anyhow!("{what} failed with {status}: {body}")
    }

    /// Register `username`. The password equals the username.
    pub async fn signup(&self, username: &str) -> anyhow::Result<SignupOutcome> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({
                "username": username,
                "email": bot_email(username),
                "password": username,
            }))
            .send()
            .await
            .context("signup request")?;

        match response.status() {
            StatusCode::CREATED => Ok(SignupOutcome::Created),
            StatusCode::CONFLICT => Ok(SignupOutcome::AlreadyRegistered),
            _ => Err(Self::failure("signup", response).await),
        }
    }

    /// Log in with the form endpoint and return the access token
    pub async fn login(&self, username: &str) -> anyhow::Result<String> {
        let email = bot_email(username);
        let response = self
            .http
            .post(self.url("/auth/login"))
            .form(&[("username", email.as_str()), ("password", username)])
            .send()
            .await
            .context("login request")?;

        if response.status() != StatusCode::OK {
            return Err(Self::failure("login", response).await);
        }

        let body: TokenBody = response.json().await.context("login response")?;
        Ok(body.access_token)
    }

    /// Publish a post and return its id
    pub async fn create_post(&self, token: &str, text: &str) -> anyhow::Result<i64> {
        let response = self
            .http
            .post(self.url("/api/posts"))
            .bearer_auth(token)
            .json(&json!({ "post": text }))
            .send()
            .await
            .context("create post request")?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::failure("create post", response).await);
        }

        let body: PostBody = response.json().await.context("create post response")?;
        Ok(body.id)
    }

    /// Every post id in the feed, newest first
    pub async fn all_post_ids(&self) -> anyhow::Result<Vec<i64>> {
        let mut ids = Vec::new();
        let mut before: Option<i64> = None;

        loop {
            let mut request = self
                .http
                .get(self.url("/api/posts"))
                .query(&[("limit", FEED_PAGE_SIZE)]);
            if let Some(cursor) = before {
                request = request.query(&[("before", cursor)]);
            }

            let response = request.send().await.context("feed request")?;
            if response.status() != StatusCode::OK {
                return Err(Self::failure("feed", response).await);
            }

            let page: PostListBody = response.json().await.context("feed response")?;
            let fetched = page.posts.len();
            ids.extend(page.posts.iter().map(|p| p.id));
            before = page.posts.last().map(|p| p.id);

            if (fetched as i64) < FEED_PAGE_SIZE || before.is_none() {
                return Ok(ids);
            }
        }
    }

    pub async fn like(&self, token: &str, post_id: i64) -> anyhow::Result<LikeOutcome> {
        let response = self
            .http
            .post(self.url(&format!("/api/posts/{post_id}/like")))
            .bearer_auth(token)
            .send()
            .await
            .context("like request")?;

        match response.status() {
            StatusCode::OK => Ok(LikeOutcome::Liked),
            StatusCode::BAD_REQUEST => {
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                if body["error"]["code"] == ALREADY_REACTED_CODE {
                    Ok(LikeOutcome::AlreadyLiked)
                } else {
                    bail!("like failed with 400: {body}")
                }
            }
            _ => Err(Self::failure("like", response).await),
        }
    }
}
