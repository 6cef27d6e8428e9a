//! Comment service
//!
//! Comments on posts. Only the author may edit or delete a comment; any other
//! caller is told the comment does not exist.

use social_core::entities::NewComment;
use social_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CommentListResponse, CommentResponse, CommentUpdatedResponse, CreateCommentRequest,
    UpdateCommentRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const COMMENT_UPDATED: &str = "Comment description is successfully changed.";

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(post_id = request.post_id))]
    pub async fn create_comment(
        &self,
        user_id: i64,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.require_post(request.post_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment::new(request.post_id, user_id, request.comment))
            .await?;

        info!(comment_id = %comment.id, user_id = %user_id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self, request), fields(comment_id = request.comment_id))]
    pub async fn update_comment(
        &self,
        user_id: i64,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentUpdatedResponse> {
        let comment = self
            .ctx
            .comment_repo()
            .update_owned(request.comment_id, request.post_id, user_id, &request.comment)
            .await?
            .ok_or(DomainError::CommentNotFound(request.comment_id))?;

        info!(comment_id = %comment.id, user_id = %user_id, "Comment updated");

        Ok(CommentUpdatedResponse {
            comment_id: comment.id,
            post_id: comment.post_id,
            comment: comment.comment,
            message: COMMENT_UPDATED.to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> ServiceResult<()> {
        if !self
            .ctx
            .comment_repo()
            .delete_owned(comment_id, user_id)
            .await?
        {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }

        info!(comment_id = %comment_id, user_id = %user_id, "Comment deleted");
        Ok(())
    }

    /// Comments of a post, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> ServiceResult<CommentListResponse> {
        self.require_post(post_id).await?;

        let comments = self
            .ctx
            .comment_repo()
            .list_for_post(post_id, before, limit)
            .await?;

        Ok(CommentListResponse {
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }

    async fn require_post(&self, post_id: i64) -> ServiceResult<()> {
        match self.ctx.post_repo().find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound(post_id).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dto::CreatePostRequest;
    use crate::services::testing::{test_context, InMemoryStore, RecordingMailer};
    use crate::services::{PostService, ServiceSettings};

    const AUTHOR: i64 = 100;
    const STRANGER: i64 = 200;

    async fn setup() -> (ServiceContext, i64) {
        let ctx = test_context(
            Arc::new(InMemoryStore::default()),
            Arc::new(RecordingMailer::default()),
            ServiceSettings::default(),
        );
        let post = PostService::new(&ctx)
            .create_post(
                AUTHOR,
                CreatePostRequest {
                    post: "discuss".to_string(),
                },
            )
            .await
            .unwrap();
        (ctx, post.id)
    }

    fn create(post_id: i64, text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            post_id,
            comment: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let (ctx, _) = setup().await;
        let err = CommentService::new(&ctx)
            .create_comment(AUTHOR, create(9999, "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Post not found");
    }

    #[tokio::test]
    async fn test_only_author_can_update() {
        let (ctx, post_id) = setup().await;
        let service = CommentService::new(&ctx);
        let comment = service
            .create_comment(AUTHOR, create(post_id, "first"))
            .await
            .unwrap();

        let request = UpdateCommentRequest {
            comment_id: comment.id,
            post_id,
            comment: "edited".to_string(),
        };

        let err = service
            .update_comment(STRANGER, request.clone())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_string(),
            "Comment not found or doesn't belong to the current user"
        );

        let updated = service.update_comment(AUTHOR, request).await.unwrap();
        assert_eq!(updated.comment, "edited");
        assert_eq!(updated.message, COMMENT_UPDATED);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let (ctx, post_id) = setup().await;
        let service = CommentService::new(&ctx);
        let first = service
            .create_comment(AUTHOR, create(post_id, "one"))
            .await
            .unwrap();
        let second = service
            .create_comment(STRANGER, create(post_id, "two"))
            .await
            .unwrap();

        let listed = service.list_comments(post_id, None, 50).await.unwrap();
        let ids: Vec<i64> = listed.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert!(service.delete_comment(first.id, STRANGER).await.is_err());
        service.delete_comment(first.id, AUTHOR).await.unwrap();

        let listed = service.list_comments(post_id, None, 50).await.unwrap();
        assert_eq!(listed.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_for_existing_post() {
        let (ctx, post_id) = setup().await;
        let service = CommentService::new(&ctx);

        let listed = service.list_comments(post_id, None, 50).await.unwrap();
        assert!(listed.comments.is_empty());

        let missing = service.list_comments(9999, None, 50).await.unwrap_err();
        assert_eq!(missing.status_code(), 404);
    }
}
