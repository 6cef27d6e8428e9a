//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{NewPost, Post};
use social_core::error::DomainError;
use social_core::traits::{PostRepository, RepoResult};

use crate::models::PostModel;

use super::error::{clamp_limit, map_db_error, map_foreign_key_violation, post_not_found};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, user_id, post, likes, dislikes, created_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(user_id = post.user_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (user_id, post)
            VALUES ($1, $2)
            RETURNING id, user_id, post, likes, dislikes, created_at
            ",
        )
        .bind(post.user_id)
        .bind(&post.post)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(post.user_id)))?;

        Ok(Post::from(result))
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: i64, user_id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let owner = sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id FROM posts WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| post_not_found(id))?;

        if owner != user_id {
            return Err(DomainError::NotPostOwner);
        }

        // comments, post_reactions and post_daily_analytics cascade
        sqlx::query(
            r"
            DELETE FROM posts WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, before: Option<i64>, limit: i64) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, user_id, post, likes, dislikes, created_at
            FROM posts
            WHERE ($1::BIGINT IS NULL OR id < $1)
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(before)
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_user(
        &self,
        user_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, user_id, post, likes, dislikes, created_at
            FROM posts
            WHERE user_id = $1 AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(user_id)
        .bind(before)
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}
