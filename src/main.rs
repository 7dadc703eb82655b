//! jobwire — Binary Entrypoint
//! Boots the admin/metrics HTTP server, wires the cache, job sources, and
//! Discord poster, and starts the daily posting schedule.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobwire::api::{self, AppState};
use jobwire::cache::RedisClient;
use jobwire::config::{self, Config};
use jobwire::jobs::ledger::PostedLedger;
use jobwire::jobs::scheduler::{self, ScheduleCfg};
use jobwire::jobs::{providers, types::SearchCriteria};
use jobwire::metrics::Metrics;
use jobwire::notify::{discord::DiscordPoster, DigestSink};
use jobwire::poster::JobRunner;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = Config::from_env().context("invalid configuration")?;
    let metrics = Metrics::init();

    let store = Arc::new(RedisClient::new(
        cfg.redis_rest_url.clone(),
        cfg.redis_rest_token.clone(),
    ));
    let ledger = PostedLedger::new(store);

    let sources = providers::from_config(&cfg);

    let sink: Option<Arc<dyn DigestSink>> = match &cfg.job_channel_id {
        Some(channel_id) => Some(Arc::new(DiscordPoster::new(
            cfg.discord_token.clone(),
            channel_id.clone(),
        ))),
        None => {
            tracing::warn!("JOB_CHANNEL_ID not set, digest posting disabled");
            None
        }
    };

    let mut criteria = SearchCriteria::default();
    if let Some(keywords) = config::load_keywords_default().context("loading keyword overrides")? {
        tracing::info!(count = keywords.len(), "using keyword override file");
        criteria.keywords = keywords;
    }

    let runner = Arc::new(
        JobRunner::new(sources, ledger.clone(), sink).with_criteria(criteria),
    );

    // Keep the handle alive; dropping it stops the schedule.
    let _scheduler = scheduler::start(
        runner.clone(),
        ScheduleCfg {
            cron: cfg.job_cron.clone(),
            timezone: cfg.timezone,
        },
    )
    .await
    .context("starting job schedule")?;

    let app = api::create_router(AppState {
        runner,
        ledger,
    })
    .merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "jobwire listening");
    axum::serve(listener, app).await.context("serving admin api")?;

    Ok(())
}
