//! Periodic analytics aggregation

use async_trait::async_trait;

use crate::services::{AnalyticsService, ServiceContext};

use super::ScheduledJob;

/// Rebuilds the daily analytics table for the configured lookback window
pub struct AnalyticsAggregationJob {
    ctx: ServiceContext,
}

impl AnalyticsAggregationJob {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ScheduledJob for AnalyticsAggregationJob {
    async fn run(&self) -> anyhow::Result<()> {
        AnalyticsService::new(&self.ctx).aggregate_now().await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "analytics_aggregation"
    }
}
