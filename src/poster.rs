// src/poster.rs
//! The posting cycle: aggregate, render, send to the digest channel, and
//! record what went out. Both the daily schedule and the manual admin
//! trigger land on [`JobRunner::run`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::jobs::ledger::PostedLedger;
use crate::jobs;
use crate::jobs::types::{JobSource, Priority, SearchCriteria};
use crate::notify::{job_embed, summary_message, DigestSink, MessagePayload};

/// Cap on embeds sent per cycle; everything found is still marked posted so
/// the overflow does not flood the next run.
pub const MAX_POSTS_PER_CYCLE: usize = 10;

/// Pause between successive channel messages to stay under the destination's
/// rate limit.
const POST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub found: usize,
    pub posted: usize,
    pub high_priority: usize,
    /// True when the cycle was skipped because no digest channel is wired.
    pub skipped: bool,
}

pub struct JobRunner {
    sources: Vec<Box<dyn JobSource>>,
    ledger: PostedLedger,
    sink: Option<Arc<dyn DigestSink>>,
    criteria: SearchCriteria,
}

impl JobRunner {
    pub fn new(
        sources: Vec<Box<dyn JobSource>>,
        ledger: PostedLedger,
        sink: Option<Arc<dyn DigestSink>>,
    ) -> Self {
        Self {
            sources,
            ledger,
            sink,
            criteria: SearchCriteria::default(),
        }
    }

    /// Replace the default criteria (keyword overrides from config).
    pub fn with_criteria(mut self, criteria: SearchCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// One full cycle with the runner's criteria. The daily schedule and the
    /// manual admin trigger both call this.
    pub async fn run(&self) -> Result<RunSummary> {
        let criteria = self.criteria.clone();
        self.run_with_criteria(&criteria).await
    }

    pub async fn run_with_criteria(&self, criteria: &SearchCriteria) -> Result<RunSummary> {
        let Some(sink) = &self.sink else {
            tracing::debug!("job channel not configured, skipping post cycle");
            return Ok(RunSummary {
                skipped: true,
                ..RunSummary::default()
            });
        };

        let listings = jobs::aggregate(&self.sources, &self.ledger, criteria).await;
        if listings.is_empty() {
            tracing::info!("no new jobs found");
            return Ok(RunSummary::default());
        }

        let high_priority = listings
            .iter()
            .filter(|l| l.priority == Priority::High)
            .count();

        sink.send(&MessagePayload::text(summary_message(
            listings.len(),
            high_priority,
        )))
        .await?;

        let limit = criteria
            .max_results
            .unwrap_or(MAX_POSTS_PER_CYCLE)
            .min(MAX_POSTS_PER_CYCLE);

        let mut posted = 0usize;
        for listing in listings.iter().take(limit) {
            match sink.send(&MessagePayload::embed(job_embed(listing))).await {
                Ok(()) => posted += 1,
                Err(e) => {
                    tracing::error!(error = ?e, job_id = %listing.id, "failed to post job");
                }
            }
            tokio::time::sleep(POST_DELAY).await;
        }

        // Mark everything found, including listings beyond the display limit.
        self.ledger.mark_all_posted(&listings).await;

        if listings.len() > limit {
            tracing::warn!(
                skipped = listings.len() - limit,
                "some jobs were skipped due to the per-cycle limit"
            );
        }

        tracing::info!(posted, total = listings.len(), "job posting completed");

        Ok(RunSummary {
            found: listings.len(),
            posted,
            high_priority,
            skipped: false,
        })
    }
}
