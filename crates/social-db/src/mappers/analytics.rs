//! Daily analytics model -> entity mapper

use social_core::entities::DailyReactionStats;

use crate::models::DailyStatsModel;

impl From<DailyStatsModel> for DailyReactionStats {
    fn from(model: DailyStatsModel) -> Self {
        DailyReactionStats {
            post_id: model.post_id,
            day: model.day,
            likes: model.likes,
            dislikes: model.dislikes,
        }
    }
}
