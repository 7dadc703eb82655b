// src/jobs/scheduler.rs
//! Daily posting schedule. The cron fires in the configured timezone and the
//! job body is the same entry point the manual admin trigger uses.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::poster::JobRunner;

#[derive(Clone, Debug)]
pub struct ScheduleCfg {
    /// Six-field cron expression (with seconds), e.g. `0 0 14 * * *`.
    pub cron: String,
    pub timezone: Tz,
}

/// Start the scheduler with one daily posting job. The returned handle must
/// be kept alive for the schedule to keep firing.
pub async fn start(runner: Arc<JobRunner>, cfg: ScheduleCfg) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await.context("creating job scheduler")?;

    let job_runner = runner.clone();
    let post_job = Job::new_async_tz(cfg.cron.as_str(), cfg.timezone, move |_uuid, _lock| {
        let runner = job_runner.clone();
        Box::pin(async move {
            tracing::info!("scheduled job posting tick");
            if let Err(e) = runner.run().await {
                tracing::error!(error = ?e, "scheduled job posting failed");
            }
        })
    })
    .with_context(|| format!("invalid job cron expression '{}'", cfg.cron))?;

    scheduler.add(post_job).await.context("adding posting job")?;
    scheduler.start().await.context("starting scheduler")?;

    tracing::info!(cron = %cfg.cron, timezone = %cfg.timezone, "job poster scheduled");
    Ok(scheduler)
}
