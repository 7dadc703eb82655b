// src/jobs/providers/mod.rs
pub mod adzuna;
pub mod creatorjobs;
pub mod themuse;

use crate::config::Config;
use crate::jobs::types::JobSource;

/// Build every adapter whose credentials are present. Absent credentials
/// disable an adapter without raising.
pub fn from_config(cfg: &Config) -> Vec<Box<dyn JobSource>> {
    let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

    if let Some(s) = adzuna::AdzunaSource::from_config(cfg) {
        sources.push(Box::new(s));
    }
    if let Some(s) = themuse::TheMuseSource::from_config(cfg) {
        sources.push(Box::new(s));
    }
    if let Some(s) = creatorjobs::CreatorJobsSource::from_config(cfg) {
        sources.push(Box::new(s));
    }

    if sources.is_empty() {
        tracing::warn!("no job sources configured, aggregation runs will be empty");
    } else {
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        tracing::info!(sources = ?names, "job sources configured");
    }

    sources
}
