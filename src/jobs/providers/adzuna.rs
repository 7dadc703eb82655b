// src/jobs/providers/adzuna.rs
//! Adzuna search adapter (keyword-scoped, primary source).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::config::Config;
use crate::jobs::normalize::{format_salary, strip_html};
use crate::jobs::types::{JobSource, Listing, Source, SourceScope};
use crate::jobs::{constants, FETCH_TIMEOUT_SECS};

const ADZUNA_BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs/us/search/1";
const RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: String,
    title: String,
    company: AdzunaCompany,
    location: AdzunaLocation,
    description: String,
    created: String,
    redirect_url: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    /// `"1"` when Adzuna estimated the salary rather than parsed it.
    salary_is_predicted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCompany {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct AdzunaLocation {
    display_name: String,
}

pub struct AdzunaSource {
    app_id: String,
    app_key: String,
    client: reqwest::Client,
}

impl AdzunaSource {
    /// Build from config; both credentials are required, otherwise the
    /// adapter is disabled.
    pub fn from_config(cfg: &Config) -> Option<Self> {
        match (cfg.adzuna_app_id.clone(), cfg.adzuna_app_key.clone()) {
            (Some(app_id), Some(app_key)) => Some(Self {
                app_id,
                app_key,
                client: reqwest::Client::new(),
            }),
            _ => {
                tracing::debug!("Adzuna credentials not configured, adapter disabled");
                None
            }
        }
    }

    fn parse_response(body: &str) -> Result<Vec<Listing>> {
        let data: AdzunaResponse =
            serde_json::from_str(body).context("parsing adzuna response")?;

        let mut out = Vec::with_capacity(data.results.len());
        for job in data.results {
            let posted: DateTime<Utc> = job
                .created
                .parse()
                .with_context(|| format!("adzuna listing {} has invalid created date", job.id))?;
            let estimated = job.salary_is_predicted.as_deref() == Some("1");

            out.push(Listing {
                priority: constants::priority_for(&job.company.display_name),
                id: job.id,
                title: job.title,
                company: job.company.display_name,
                location: job.location.display_name,
                description: strip_html(&job.description),
                url: job.redirect_url,
                salary: format_salary(job.salary_min, job.salary_max, estimated),
                posted,
                source: Source::Adzuna,
            });
        }

        counter!("job_listings_fetched_total", "source" => "adzuna").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    async fn fetch(&self, keyword: Option<&str>, max_age_days: u32) -> Result<Vec<Listing>> {
        let Some(keyword) = keyword else {
            return Ok(Vec::new());
        };

        let t0 = std::time::Instant::now();
        let rsp = self
            .client
            .get(ADZUNA_BASE_URL)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("what", keyword),
                // Remote roles only
                ("where", "remote"),
                ("max_days_old", &max_age_days.to_string()),
                ("results_per_page", &RESULTS_PER_PAGE.to_string()),
                // Most recent first
                ("sort_by", "date"),
            ])
            .send()
            .await
            .context("adzuna http get()")?
            .error_for_status()
            .context("adzuna returned error status")?;

        let body = rsp.text().await.context("adzuna http .text()")?;
        histogram!("job_fetch_ms", "source" => "adzuna")
            .record(t0.elapsed().as_secs_f64() * 1_000.0);

        let listings = Self::parse_response(&body)?;
        tracing::debug!(keyword, count = listings.len(), "fetched jobs from Adzuna");
        Ok(listings)
    }

    fn name(&self) -> &'static str {
        "adzuna"
    }

    fn scope(&self) -> SourceScope {
        SourceScope::Keyword
    }
}
