//! Aggregated reaction statistics

use chrono::NaiveDate;

/// Likes and dislikes a post received on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyReactionStats {
    pub post_id: i64,
    pub day: NaiveDate,
    pub likes: i32,
    pub dislikes: i32,
}

impl DailyReactionStats {
    pub fn total(&self) -> i32 {
        self.likes + self.dislikes
    }
}
