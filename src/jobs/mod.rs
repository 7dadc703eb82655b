// src/jobs/mod.rs
pub mod constants;
pub mod ledger;
pub mod normalize;
pub mod providers;
pub mod scheduler;
pub mod types;

use std::collections::HashSet;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::jobs::ledger::PostedLedger;
use crate::jobs::types::{JobSource, Listing, SearchCriteria, SourceScope};

/// Per-request timeout for every outbound provider call, so one slow board
/// cannot stall the whole run.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "job_listings_fetched_total",
            "Listings parsed from provider responses."
        );
        describe_counter!(
            "job_listings_kept_total",
            "Listings surviving exclusion, dedup, and the posted ledger."
        );
        describe_counter!(
            "job_listings_excluded_total",
            "Listings dropped by the industry exclusion filter."
        );
        describe_counter!(
            "job_listings_dedup_total",
            "Listings dropped as duplicate ids within a run."
        );
        describe_counter!(
            "job_listings_already_posted_total",
            "Listings dropped because the ledger has seen them."
        );
        describe_counter!("job_source_errors_total", "Provider fetch/parse failures.");
        describe_histogram!("job_fetch_ms", "Provider fetch time in milliseconds.");
        describe_gauge!(
            "job_pipeline_last_run_ts",
            "Unix ts when the aggregation pipeline last ran."
        );
        describe_counter!(
            "cache_operations_total",
            "Cache commands issued, by operation and status."
        );
    });
}

/// Does any search keyword appear in the listing's title or description?
/// Used to scope catalog sources after their single full-catalog fetch.
/// Expects an already-lowercased keyword list.
fn keyword_matches(listing: &Listing, lowered_keywords: &[String]) -> bool {
    let title = listing.title.to_lowercase();
    let description = listing.description.to_lowercase();
    lowered_keywords
        .iter()
        .any(|kw| title.contains(kw.as_str()) || description.contains(kw.as_str()))
}

/// Stable dedup by id, first occurrence wins. Returns survivors and the
/// number of duplicates dropped.
fn dedup_by_id(listings: Vec<Listing>) -> (Vec<Listing>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(listings.len());
    let mut kept = Vec::with_capacity(listings.len());
    let mut dropped = 0usize;
    for listing in listings {
        if seen.insert(listing.id.clone()) {
            kept.push(listing);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

/// Priority first (High, Medium, Low), newest first within a tier.
fn sort_listings(listings: &mut [Listing]) {
    listings.sort_by_key(|l| (l.priority.rank(), std::cmp::Reverse(l.posted)));
}

async fn fetch_from(
    source: &dyn JobSource,
    keyword: Option<&str>,
    max_age_days: u32,
) -> Vec<Listing> {
    match source.fetch(keyword, max_age_days).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::warn!(error = ?e, source = source.name(), keyword, "job source error");
            counter!("job_source_errors_total", "source" => source.name()).increment(1);
            Vec::new()
        }
    }
}

/// One aggregation run: fetch → exclude → dedup → ledger filter → sort.
///
/// Adapter calls are issued sequentially (providers enforce per-minute call
/// budgets); catalog sources are fetched once per run regardless of keyword
/// count and matched post-hoc. Partial source failures never abort the run;
/// an empty result is the valid "no news" outcome. Truncation to a display
/// limit is the caller's job.
pub async fn aggregate(
    sources: &[Box<dyn JobSource>],
    ledger: &PostedLedger,
    criteria: &SearchCriteria,
) -> Vec<Listing> {
    ensure_metrics_described();

    tracing::info!(
        target: "jobs",
        keywords = criteria.keywords.len(),
        max_age_days = criteria.max_age_days,
        "starting aggregation run"
    );

    let mut all: Vec<Listing> = Vec::new();

    for keyword in &criteria.keywords {
        for source in sources.iter().filter(|s| s.scope() == SourceScope::Keyword) {
            let mut batch = fetch_from(source.as_ref(), Some(keyword), criteria.max_age_days).await;
            all.append(&mut batch);
        }
    }

    // Lowercased once per run, not per listing.
    let lowered_keywords: Vec<String> = criteria
        .keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .collect();

    for source in sources.iter().filter(|s| s.scope() == SourceScope::Catalog) {
        let catalog = fetch_from(source.as_ref(), None, criteria.max_age_days).await;
        let before = catalog.len();
        let mut matched: Vec<Listing> = catalog
            .into_iter()
            .filter(|l| keyword_matches(l, &lowered_keywords))
            .collect();
        tracing::debug!(
            source = source.name(),
            fetched = before,
            matched = matched.len(),
            "catalog source keyword-matched"
        );
        all.append(&mut matched);
    }

    let fetched = all.len();

    let mut excluded = 0usize;
    all.retain(|l| {
        let keep = !constants::is_excluded(&l.title, &l.company, &l.description);
        if !keep {
            excluded += 1;
        }
        keep
    });

    let (unique, duplicates) = dedup_by_id(all);

    let mut fresh = Vec::with_capacity(unique.len());
    let mut already_posted = 0usize;
    for listing in unique {
        if ledger.is_posted(&listing.id).await {
            already_posted += 1;
        } else {
            fresh.push(listing);
        }
    }

    sort_listings(&mut fresh);

    counter!("job_listings_kept_total").increment(fresh.len() as u64);
    counter!("job_listings_excluded_total").increment(excluded as u64);
    counter!("job_listings_dedup_total").increment(duplicates as u64);
    counter!("job_listings_already_posted_total").increment(already_posted as u64);
    gauge!("job_pipeline_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    tracing::info!(
        target: "jobs",
        fetched,
        excluded,
        duplicates,
        already_posted,
        kept = fresh.len(),
        "aggregation run finished"
    );

    fresh
}
