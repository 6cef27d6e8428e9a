//! PostgreSQL implementation of ReactionRepository
//!
//! Every mutation locks the post row, changes the reaction row and adjusts
//! `posts.likes` / `posts.dislikes` in one transaction, so the counters always
//! equal the number of reaction rows of each polarity.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use social_core::entities::{Post, PostReaction, ReactionChange, ReactionKind, ReactionOutcome};
use social_core::error::DomainError;
use social_core::traits::{ReactionRepository, RepoResult};

use crate::models::{PostModel, PostReactionModel};

use super::error::{map_db_error, map_unique_violation, post_not_found};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

/// Counter adjustment as (likes, dislikes)
fn counter_delta(kind: ReactionKind, amount: i32) -> (i32, i32) {
    match kind {
        ReactionKind::Like => (amount, 0),
        ReactionKind::Dislike => (0, amount),
    }
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the post row for the rest of the transaction
    async fn lock_post(tx: &mut Transaction<'_, Postgres>, post_id: i64) -> RepoResult<()> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM posts WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| post_not_found(post_id))?;

        Ok(())
    }

    async fn current_reaction(
        tx: &mut Transaction<'_, Postgres>,
        post_id: i64,
        user_id: i64,
    ) -> RepoResult<Option<ReactionKind>> {
        let raw = sqlx::query_scalar::<_, String>(
            r"
            SELECT reaction FROM post_reactions WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        raw.map(|s| s.parse::<ReactionKind>()).transpose()
    }

    async fn apply_delta(
        tx: &mut Transaction<'_, Postgres>,
        post_id: i64,
        (likes, dislikes): (i32, i32),
    ) -> RepoResult<Post> {
        let post = sqlx::query_as::<_, PostModel>(
            r"
            UPDATE posts
            SET likes = likes + $2, dislikes = dislikes + $3
            WHERE id = $1
            RETURNING id, user_id, post, likes, dislikes, created_at
            ",
        )
        .bind(post_id)
        .bind(likes)
        .bind(dislikes)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(Post::from(post))
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: i64, user_id: i64) -> RepoResult<Option<PostReaction>> {
        let result = sqlx::query_as::<_, PostReactionModel>(
            r"
            SELECT id, post_id, user_id, reaction, created_at, updated_at
            FROM post_reactions
            WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(PostReaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn react(
        &self,
        post_id: i64,
        user_id: i64,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_post(&mut tx, post_id).await?;

        let (change, delta) = match Self::current_reaction(&mut tx, post_id, user_id).await? {
            Some(existing) if existing == kind => {
                return Err(DomainError::AlreadyReacted(kind));
            }
            Some(existing) => {
                sqlx::query(
                    r"
                    UPDATE post_reactions
                    SET reaction = $3, updated_at = NOW()
                    WHERE post_id = $1 AND user_id = $2
                    ",
                )
                .bind(post_id)
                .bind(user_id)
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                let (add_likes, add_dislikes) = counter_delta(kind, 1);
                let (sub_likes, sub_dislikes) = counter_delta(existing, -1);
                (
                    ReactionChange::Switched,
                    (add_likes + sub_likes, add_dislikes + sub_dislikes),
                )
            }
            None => {
                sqlx::query(
                    r"
                    INSERT INTO post_reactions (post_id, user_id, reaction)
                    VALUES ($1, $2, $3)
                    ",
                )
                .bind(post_id)
                .bind(user_id)
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_unique_violation(e, || DomainError::AlreadyReacted(kind)))?;

                (ReactionChange::Created, counter_delta(kind, 1))
            }
        };

        let post = Self::apply_delta(&mut tx, post_id, delta).await?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(post_id, user_id, reaction = %kind, ?change, "Reaction stored");

        Ok(ReactionOutcome {
            post,
            change,
            current: Some(kind),
        })
    }

    #[instrument(skip(self))]
    async fn remove(&self, post_id: i64, user_id: i64) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_post(&mut tx, post_id).await?;

        let removed = sqlx::query_scalar::<_, String>(
            r"
            DELETE FROM post_reactions
            WHERE post_id = $1 AND user_id = $2
            RETURNING reaction
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::ReactionNotFound)?
        .parse::<ReactionKind>()?;

        let post = Self::apply_delta(&mut tx, post_id, counter_delta(removed, -1)).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ReactionOutcome {
            post,
            change: ReactionChange::Removed,
            current: None,
        })
    }

    #[instrument(skip(self))]
    async fn count_for_post(&self, post_id: i64) -> RepoResult<(i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*) FILTER (WHERE reaction = 'like'),
                   COUNT(*) FILTER (WHERE reaction = 'dislike')
            FROM post_reactions
            WHERE post_id = $1
            ",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(counts)
    }
}
