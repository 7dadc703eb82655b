// tests/schedule.rs
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{KeywordSource, MemoryStore, RecordingSink, SharedSource};
use jobwire::jobs::ledger::PostedLedger;
use jobwire::jobs::scheduler::{start, ScheduleCfg};
use jobwire::jobs::types::{JobSource, SearchCriteria};
use jobwire::poster::JobRunner;

fn runner() -> Arc<JobRunner> {
    let source = Arc::new(KeywordSource::new(Vec::new()));
    Arc::new(JobRunner::new(
        vec![Box::new(SharedSource(source)) as Box<dyn JobSource>],
        PostedLedger::new(Arc::new(MemoryStore::default())),
        None,
    ))
}

#[tokio::test]
async fn valid_cron_starts() {
    let cfg = ScheduleCfg {
        cron: "0 0 14 * * *".to_string(),
        timezone: chrono_tz::America::Chicago,
    };
    let scheduler = start(runner(), cfg).await;
    assert!(scheduler.is_ok());
    if let Ok(mut s) = scheduler {
        let _ = s.shutdown().await;
    }
}

#[tokio::test]
async fn cron_tick_runs_a_cycle_with_default_criteria() {
    let source = Arc::new(KeywordSource::new(Vec::new()));
    let runner = Arc::new(JobRunner::new(
        vec![Box::new(SharedSource(source.clone())) as Box<dyn JobSource>],
        PostedLedger::new(Arc::new(MemoryStore::default())),
        Some(Arc::new(RecordingSink::default())),
    ));

    // Every-second cron so a tick lands during the test window.
    let cfg = ScheduleCfg {
        cron: "* * * * * *".to_string(),
        timezone: chrono_tz::UTC,
    };
    let mut scheduler = start(runner, cfg).await.unwrap();

    // A tick runs the same entry point as the manual trigger, with the
    // default curated keywords.
    let expected = SearchCriteria::default().keywords;
    for _ in 0..50 {
        if source.seen_keywords.lock().unwrap().len() >= expected.len() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let seen = source.seen_keywords.lock().unwrap().clone();
    assert!(seen.len() >= expected.len(), "no scheduled tick observed");
    assert_eq!(seen[..expected.len()], expected[..]);

    let _ = scheduler.shutdown().await;
}

#[tokio::test]
async fn invalid_cron_is_rejected() {
    let cfg = ScheduleCfg {
        cron: "not a cron".to_string(),
        timezone: chrono_tz::UTC,
    };
    assert!(start(runner(), cfg).await.is_err());
}
