// src/jobs/providers/creatorjobs.rs
//! Creator-economy job feed adapter (catalog-scoped). The feed has no search
//! endpoint, so the whole catalog is fetched once per aggregation run and
//! keyword matching happens downstream in the pipeline. Listings without a
//! stable id get one derived from the posting URL.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use metrics::{counter, histogram};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::jobs::normalize::{format_salary, strip_html};
use crate::jobs::types::{JobSource, Listing, Source, SourceScope};
use crate::jobs::{constants, FETCH_TIMEOUT_SECS};

#[derive(Debug, Deserialize)]
struct CreatorJobsFeed {
    jobs: Vec<CreatorJob>,
}

#[derive(Debug, Deserialize)]
struct CreatorJob {
    id: Option<String>,
    title: String,
    company: String,
    #[serde(default)]
    location: Option<String>,
    description: String,
    url: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    published_at: String,
}

pub struct CreatorJobsSource {
    feed_url: String,
    client: reqwest::Client,
}

impl CreatorJobsSource {
    pub fn from_config(cfg: &Config) -> Option<Self> {
        match cfg.creatorjobs_feed_url.clone() {
            Some(feed_url) => Some(Self {
                feed_url,
                client: reqwest::Client::new(),
            }),
            None => {
                tracing::debug!("CreatorJobs feed URL not configured, adapter disabled");
                None
            }
        }
    }

    /// `cj-` plus the first 12 hex chars of sha256(url); stable across runs.
    fn derived_id(url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        let mut out = String::with_capacity(15);
        out.push_str("cj-");
        for b in digest.iter().take(6) {
            use std::fmt::Write as _;
            let _ = write!(&mut out, "{:02x}", b);
        }
        out
    }

    fn parse_response(body: &str, now: DateTime<Utc>, max_age_days: u32) -> Result<Vec<Listing>> {
        let feed: CreatorJobsFeed =
            serde_json::from_str(body).context("parsing creatorjobs feed")?;
        let cutoff = now - ChronoDuration::days(i64::from(max_age_days));

        let mut out = Vec::new();
        for job in feed.jobs {
            let posted: DateTime<Utc> = job.published_at.parse().with_context(|| {
                format!("creatorjobs listing at {} has invalid published_at", job.url)
            })?;
            if posted < cutoff {
                continue;
            }

            let id = match job.id {
                Some(raw) => format!("cj-{raw}"),
                None => Self::derived_id(&job.url),
            };

            out.push(Listing {
                id,
                priority: constants::priority_for(&job.company),
                title: job.title,
                company: job.company,
                location: job.location.unwrap_or_else(|| "Remote".to_string()),
                description: strip_html(&job.description),
                url: job.url,
                salary: format_salary(job.salary_min, job.salary_max, false),
                posted,
                source: Source::CreatorJobs,
            });
        }

        counter!("job_listings_fetched_total", "source" => "creatorjobs")
            .increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl JobSource for CreatorJobsSource {
    async fn fetch(&self, _keyword: Option<&str>, max_age_days: u32) -> Result<Vec<Listing>> {
        let t0 = std::time::Instant::now();
        let rsp = self
            .client
            .get(&self.feed_url)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .send()
            .await
            .context("creatorjobs http get()")?
            .error_for_status()
            .context("creatorjobs returned error status")?;

        let body = rsp.text().await.context("creatorjobs http .text()")?;
        histogram!("job_fetch_ms", "source" => "creatorjobs")
            .record(t0.elapsed().as_secs_f64() * 1_000.0);

        let listings = Self::parse_response(&body, Utc::now(), max_age_days)?;
        tracing::debug!(count = listings.len(), "fetched CreatorJobs catalog");
        Ok(listings)
    }

    fn name(&self) -> &'static str {
        "creatorjobs"
    }

    fn scope(&self) -> SourceScope {
        SourceScope::Catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../../tests/fixtures/creatorjobs.json");

    fn fixed_now() -> DateTime<Utc> {
        "2024-11-12T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn parses_catalog_with_prefixed_ids() {
        let listings = CreatorJobsSource::parse_response(FIXTURE, fixed_now(), 30).unwrap();
        assert!(!listings.is_empty());
        assert!(listings.iter().all(|l| l.id.starts_with("cj-")));
        assert!(listings.iter().all(|l| l.source == Source::CreatorJobs));
    }

    #[test]
    fn derived_id_is_stable_and_distinct() {
        let a = CreatorJobsSource::derived_id("https://example.test/jobs/1");
        let b = CreatorJobsSource::derived_id("https://example.test/jobs/1");
        let c = CreatorJobsSource::derived_id("https://example.test/jobs/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), "cj-".len() + 12);
    }

    #[test]
    fn missing_location_defaults_to_remote() {
        let listings = CreatorJobsSource::parse_response(FIXTURE, fixed_now(), 365).unwrap();
        assert!(listings.iter().any(|l| l.location == "Remote"));
    }
}
