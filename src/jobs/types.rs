// src/jobs/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Relevance tier derived from company-name matching against the curated
/// lists in `constants`. `Low` is reserved; the classifier currently only
/// emits `High` and `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: High first, Low last.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Adzuna,
    #[serde(rename = "themuse")]
    TheMuse,
    CreatorJobs,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Adzuna => "adzuna",
            Source::TheMuse => "themuse",
            Source::CreatorJobs => "creatorjobs",
        }
    }
}

/// One job posting after normalization. Provider response shapes are decoded
/// at the adapter boundary and converted into this record exactly once.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Listing {
    /// Unique per source; non-primary sources prefix their ids to avoid
    /// collisions (`muse-`, `cj-`).
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Plain text, HTML stripped.
    pub description: String,
    pub url: String,
    /// Formatted range/floor/ceiling, `None` when the provider gave neither bound.
    pub salary: Option<String>,
    pub posted: DateTime<Utc>,
    pub priority: Priority,
    pub source: Source,
}

/// Search parameters for one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub keywords: Vec<String>,
    pub max_age_days: u32,
    pub max_results: Option<usize>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            keywords: crate::jobs::constants::JOB_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_age_days: 7,
            max_results: None,
        }
    }
}

/// How a source is queried during an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScope {
    /// Supports keyword-scoped queries; called once per keyword.
    Keyword,
    /// Only serves its full catalog; called once per run and filtered
    /// post-hoc by keyword match.
    Catalog,
}

#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch listings. Keyword-scoped sources receive `Some(keyword)`;
    /// catalog-scoped sources are called once with `None`.
    async fn fetch(&self, keyword: Option<&str>, max_age_days: u32) -> Result<Vec<Listing>>;
    fn name(&self) -> &'static str;
    fn scope(&self) -> SourceScope;
}
