//! Analytics service
//!
//! Per-day like/dislike counts of a post, read from the aggregated table and
//! cached in Redis for a short time.

use chrono::{Days, NaiveDate, Utc};
use social_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AnalyticsEntry, AnalyticsQuery, AnalyticsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// First day recomputed by an aggregation run covering `lookback_days` days
/// up to and including `today`
pub fn aggregation_start(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    let span = u64::from(lookback_days.max(1) - 1);
    today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN)
}

/// Analytics service
pub struct AnalyticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Daily reaction counts of a post the caller owns
    #[instrument(skip(self, query), fields(start = %query.start_date, end = %query.end_date))]
    pub async fn post_likes_dislikes(
        &self,
        post_id: i64,
        user_id: i64,
        query: AnalyticsQuery,
    ) -> ServiceResult<AnalyticsResponse> {
        let AnalyticsQuery {
            start_date,
            end_date,
        } = query;

        if start_date > end_date {
            return Err(DomainError::InvalidDateRange.into());
        }

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_owned_by(user_id) {
            warn!(post_id = %post_id, user_id = %user_id, "Analytics denied to non-owner");
            return Err(DomainError::NotPostOwner.into());
        }

        let cache = self.ctx.analytics_cache();
        if let Some(cached) = cache.get(post_id, start_date, end_date).await {
            return Ok(cached);
        }

        let rows = self
            .ctx
            .analytics_repo()
            .daily_stats(post_id, start_date, end_date)
            .await?;

        let response = AnalyticsResponse {
            analytics_data: rows
                .into_iter()
                .filter(|row| row.total() > 0)
                .map(AnalyticsEntry::from)
                .collect(),
        };

        cache.put(post_id, start_date, end_date, &response).await;

        Ok(response)
    }

    /// Recompute the lookback window and drop cached results.
    /// Returns the number of rows written.
    #[instrument(skip(self))]
    pub async fn aggregate_now(&self) -> ServiceResult<u64> {
        let since = aggregation_start(
            Utc::now().date_naive(),
            self.ctx.settings().analytics.lookback_days,
        );

        let rows = self.ctx.analytics_repo().aggregate_since(since).await?;

        if let Err(e) = self.ctx.analytics_cache().invalidate_all().await {
            warn!(error = %e, "Failed to invalidate analytics cache");
        }

        info!(rows, since = %since, "Analytics aggregated");
        Ok(rows)
    }
}
