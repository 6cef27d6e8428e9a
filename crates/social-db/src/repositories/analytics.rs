//! PostgreSQL implementation of AnalyticsRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::DailyReactionStats;
use social_core::traits::{AnalyticsRepository, RepoResult};

use crate::models::DailyStatsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AnalyticsRepository
#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    #[instrument(skip(self))]
    async fn aggregate_since(&self, since: NaiveDate) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Rebuild the window from scratch so removed reactions disappear too
        sqlx::query(
            r"
            DELETE FROM post_daily_analytics WHERE day >= $1
            ",
        )
        .bind(since)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO post_daily_analytics (post_id, day, likes, dislikes, updated_at)
            SELECT post_id,
                   (created_at AT TIME ZONE 'UTC')::DATE AS day,
                   COUNT(*) FILTER (WHERE reaction = 'like')::INT,
                   COUNT(*) FILTER (WHERE reaction = 'dislike')::INT,
                   NOW()
            FROM post_reactions
            WHERE (created_at AT TIME ZONE 'UTC')::DATE >= $1
            GROUP BY post_id, day
            ",
        )
        .bind(since)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted.rows_affected())
    }

    #[instrument(skip(self))]
    async fn daily_stats(
        &self,
        post_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<DailyReactionStats>> {
        let results = sqlx::query_as::<_, DailyStatsModel>(
            r"
            SELECT post_id, day, likes, dislikes
            FROM post_daily_analytics
            WHERE post_id = $1 AND day BETWEEN $2 AND $3
            ORDER BY day
            ",
        )
        .bind(post_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DailyReactionStats::from).collect())
    }
}
