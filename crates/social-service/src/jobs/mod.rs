//! Background jobs
//!
//! A job runs on a fixed interval until the shutdown broadcast fires. Failures
//! never stop the loop; after repeated failures the loop backs off before the
//! next attempt.

mod aggregation;

pub use aggregation::AnalyticsAggregationJob;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{error, info};

/// Consecutive failures before backoff kicks in
const BACKOFF_THRESHOLD: u32 = 3;

/// Largest backoff exponent (2^5 = 32s)
const MAX_BACKOFF_EXPONENT: u32 = 5;

/// A unit of periodic work
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    async fn run(&self) -> anyhow::Result<()>;

    /// Job name for logs
    fn name(&self) -> &str;
}

/// Delay applied after `consecutive_failures` failed runs
pub fn backoff_delay(consecutive_failures: u32) -> Option<Duration> {
    (consecutive_failures >= BACKOFF_THRESHOLD).then(|| {
        Duration::from_secs(2u64.pow(consecutive_failures.min(MAX_BACKOFF_EXPONENT)))
    })
}

/// Run `job` every `period` until `shutdown` receives a value or closes.
/// The first run happens immediately.
pub async fn run_job_loop(
    job: Arc<dyn ScheduledJob>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut consecutive_failures = 0u32;

    info!(
        job_name = %job.name(),
        interval_secs = period.as_secs(),
        "Starting job loop"
    );

    loop {
        tokio::select! {
            // A shutdown sent while the job was running wins over a ready tick
            biased;

            _ = shutdown.recv() => {
                info!(job_name = %job.name(), "Received shutdown signal, stopping job loop");
                break;
            }
            _ = timer.tick() => {
                let started = Instant::now();

                match job.run().await {
                    Ok(()) => {
                        if consecutive_failures > 0 {
                            info!(
                                job_name = %job.name(),
                                recovered_after = consecutive_failures,
                                "Job recovered after failures"
                            );
                            consecutive_failures = 0;
                        }
                        info!(
                            job_name = %job.name(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "Job run completed"
                        );
                    }
                    Err(e) => {
                        consecutive_failures += 1;
                        error!(
                            job_name = %job.name(),
                            error = %e,
                            consecutive_failures,
                            "Job run failed, will retry on next interval"
                        );

                        if let Some(delay) = backoff_delay(consecutive_failures) {
                            info!(
                                job_name = %job.name(),
                                backoff_secs = delay.as_secs(),
                                "Backing off after consecutive failures"
                            );
                            tokio::select! {
                                _ = tokio::time::sleep(delay) => {}
                                _ = shutdown.recv() => break,
                            }
                        }
                    }
                }
            }
        }
    }

    info!(job_name = %job.name(), "Job loop stopped");
}
