// src/jobs/providers/themuse.rs
//! The Muse search adapter (keyword-scoped). Ids are prefixed `muse-` to
//! avoid colliding with the primary source. The API has no age parameter,
//! so publication dates are filtered client-side.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::config::Config;
use crate::jobs::normalize::strip_html;
use crate::jobs::types::{JobSource, Listing, Source, SourceScope};
use crate::jobs::{constants, FETCH_TIMEOUT_SECS};

const THEMUSE_BASE_URL: &str = "https://www.themuse.com/api/public/jobs";

#[derive(Debug, Deserialize)]
struct MuseResponse {
    results: Vec<MuseJob>,
}

#[derive(Debug, Deserialize)]
struct MuseJob {
    id: u64,
    name: String,
    company: MuseCompany,
    #[serde(default)]
    locations: Vec<MuseLocation>,
    contents: String,
    refs: MuseRefs,
    publication_date: String,
}

#[derive(Debug, Deserialize)]
struct MuseCompany {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MuseLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MuseRefs {
    landing_page: String,
}

pub struct TheMuseSource {
    api_key: String,
    client: reqwest::Client,
}

impl TheMuseSource {
    pub fn from_config(cfg: &Config) -> Option<Self> {
        match cfg.themuse_api_key.clone() {
            Some(api_key) => Some(Self {
                api_key,
                client: reqwest::Client::new(),
            }),
            None => {
                tracing::debug!("The Muse API key not configured, adapter disabled");
                None
            }
        }
    }

    fn parse_response(body: &str, now: DateTime<Utc>, max_age_days: u32) -> Result<Vec<Listing>> {
        let data: MuseResponse = serde_json::from_str(body).context("parsing themuse response")?;
        let cutoff = now - ChronoDuration::days(i64::from(max_age_days));

        let mut out = Vec::new();
        for job in data.results {
            let posted: DateTime<Utc> = job.publication_date.parse().with_context(|| {
                format!("themuse listing {} has invalid publication date", job.id)
            })?;
            if posted < cutoff {
                continue;
            }

            let location = if job.locations.is_empty() {
                "Unspecified".to_string()
            } else {
                job.locations
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            out.push(Listing {
                id: format!("muse-{}", job.id),
                priority: constants::priority_for(&job.company.name),
                title: job.name,
                company: job.company.name,
                location,
                description: strip_html(&job.contents),
                url: job.refs.landing_page,
                // The Muse does not expose salary data
                salary: None,
                posted,
                source: Source::TheMuse,
            });
        }

        counter!("job_listings_fetched_total", "source" => "themuse").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl JobSource for TheMuseSource {
    async fn fetch(&self, keyword: Option<&str>, max_age_days: u32) -> Result<Vec<Listing>> {
        let Some(keyword) = keyword else {
            return Ok(Vec::new());
        };

        let t0 = std::time::Instant::now();
        let rsp = self
            .client
            .get(THEMUSE_BASE_URL)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", keyword),
                ("page", "1"),
                ("descending", "true"),
            ])
            .send()
            .await
            .context("themuse http get()")?
            .error_for_status()
            .context("themuse returned error status")?;

        let body = rsp.text().await.context("themuse http .text()")?;
        histogram!("job_fetch_ms", "source" => "themuse")
            .record(t0.elapsed().as_secs_f64() * 1_000.0);

        let listings = Self::parse_response(&body, Utc::now(), max_age_days)?;
        tracing::debug!(keyword, count = listings.len(), "fetched jobs from The Muse");
        Ok(listings)
    }

    fn name(&self) -> &'static str {
        "themuse"
    }

    fn scope(&self) -> SourceScope {
        SourceScope::Keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../../tests/fixtures/themuse.json");

    fn fixed_now() -> DateTime<Utc> {
        "2024-11-12T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn ids_are_prefixed() {
        let listings = TheMuseSource::parse_response(FIXTURE, fixed_now(), 30).unwrap();
        assert!(listings.iter().all(|l| l.id.starts_with("muse-")));
        assert!(listings.iter().all(|l| l.source == Source::TheMuse));
    }

    #[test]
    fn old_listings_are_age_filtered() {
        let all = TheMuseSource::parse_response(FIXTURE, fixed_now(), 365).unwrap();
        let recent = TheMuseSource::parse_response(FIXTURE, fixed_now(), 7).unwrap();
        assert!(recent.len() < all.len());
        let cutoff = fixed_now() - ChronoDuration::days(7);
        assert!(recent.iter().all(|l| l.posted >= cutoff));
    }

    #[test]
    fn locations_join_and_default() {
        let listings = TheMuseSource::parse_response(FIXTURE, fixed_now(), 365).unwrap();
        assert!(listings.iter().any(|l| l.location.contains(", ")));
        assert!(listings.iter().any(|l| l.location == "Unspecified"));
    }
}
