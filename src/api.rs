// src/api.rs
//! Health + admin HTTP surface. The manual job trigger is fire-and-forget:
//! the response acknowledges submission and the run reports its outcome only
//! through logs, never back through this handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::jobs::ledger::PostedLedger;
use crate::poster::JobRunner;

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<JobRunner>,
    pub ledger: PostedLedger,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/admin/run-jobs", post(run_jobs))
        .route("/admin/clear-job-cache", post(clear_job_cache))
        .route("/admin/job-cache", get(job_cache_count))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct TriggerResp {
    status: &'static str,
}

/// Kick off a posting cycle in the background and acknowledge immediately.
async fn run_jobs(State(state): State<AppState>) -> (StatusCode, Json<TriggerResp>) {
    let runner = state.runner.clone();
    tokio::spawn(async move {
        match runner.run().await {
            Ok(summary) => {
                tracing::info!(
                    found = summary.found,
                    posted = summary.posted,
                    "manual job run finished"
                );
            }
            Err(e) => tracing::error!(error = ?e, "manual job run failed"),
        }
    });

    (StatusCode::ACCEPTED, Json(TriggerResp { status: "started" }))
}

#[derive(serde::Serialize)]
struct ClearResp {
    cleared: usize,
}

async fn clear_job_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearResp>, (StatusCode, String)> {
    match state.ledger.clear().await {
        Ok(cleared) => Ok(Json(ClearResp { cleared })),
        Err(e) => {
            tracing::error!(error = ?e, "failed to clear job cache");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to clear job cache".to_string(),
            ))
        }
    }
}

#[derive(serde::Serialize)]
struct CountResp {
    entries: usize,
}

async fn job_cache_count(
    State(state): State<AppState>,
) -> Result<Json<CountResp>, (StatusCode, String)> {
    match state.ledger.count().await {
        Ok(entries) => Ok(Json(CountResp { entries })),
        Err(e) => {
            tracing::error!(error = ?e, "failed to count job cache entries");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to count job cache entries".to_string(),
            ))
        }
    }
}
