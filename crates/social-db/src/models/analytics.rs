//! Daily analytics database model

use chrono::NaiveDate;
use sqlx::FromRow;

/// Row of post_daily_analytics
#[derive(Debug, Clone, FromRow)]
pub struct DailyStatsModel {
    pub post_id: i64,
    pub day: NaiveDate,
    pub likes: i32,
    pub dislikes: i32,
}
