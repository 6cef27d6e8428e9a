//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Comment, NewComment};
use social_core::traits::{CommentRepository, RepoResult};

use crate::models::CommentModel;

use super::error::{clamp_limit, map_db_error, map_foreign_key_violation, post_not_found};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, comment, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(post_id = comment.post_id, user_id = comment.user_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (post_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, comment, created_at, updated_at
            ",
        )
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.comment)
        .fetch_one(&self.pool)
        .await
        // the post may be deleted between the service check and the insert
        .map_err(|e| map_foreign_key_violation(e, || post_not_found(comment.post_id)))?;

        Ok(Comment::from(result))
    }

    #[instrument(skip(self, text))]
    async fn update_owned(
        &self,
        id: i64,
        post_id: i64,
        user_id: i64,
        text: &str,
    ) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            UPDATE comments
            SET comment = $4, updated_at = NOW()
            WHERE id = $1 AND post_id = $2 AND user_id = $3
            RETURNING id, post_id, user_id, comment, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(post_id)
        .bind(user_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_for_post(
        &self,
        post_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, comment, created_at, updated_at
            FROM comments
            WHERE post_id = $1 AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(post_id)
        .bind(before)
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
