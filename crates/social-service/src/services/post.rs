//! Post service
//!
//! Creating, reading, listing and deleting posts.

use social_core::entities::NewPost;
use social_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{CreatePostRequest, PostListResponse, PostResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post owned by `user_id`
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        user_id: i64,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .create(&NewPost::new(user_id, request.post))
            .await?;

        info!(post_id = %post.id, user_id = %user_id, "Post created");

        Ok(PostResponse::from(post))
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: i64) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        Ok(PostResponse::from(post))
    }

    /// Delete a post. Only its owner may do so; comments, reactions and
    /// analytics rows go with it.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> ServiceResult<()> {
        self.ctx.post_repo().delete_owned(post_id, user_id).await?;

        if let Err(e) = self.ctx.analytics_cache().invalidate_post(post_id).await {
            warn!(post_id = %post_id, error = %e, "Failed to drop cached analytics");
        }

        info!(post_id = %post_id, user_id = %user_id, "Post deleted");
        Ok(())
    }

    /// Newest posts first
    #[instrument(skip(self))]
    pub async fn list_feed(&self, before: Option<i64>, limit: i64) -> ServiceResult<PostListResponse> {
        let posts = self.ctx.post_repo().list_recent(before, limit).await?;

        Ok(PostListResponse {
            posts: posts.into_iter().map(PostResponse::from).collect(),
        })
    }

    /// Newest posts of one user first
    #[instrument(skip(self))]
    pub async fn list_user_posts(
        &self,
        user_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> ServiceResult<PostListResponse> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        let posts = self
            .ctx
            .post_repo()
            .list_by_user(user_id, before, limit)
            .await?;

        Ok(PostListResponse {
            posts: posts.into_iter().map(PostResponse::from).collect(),
        })
    }
}
