// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod cache;
pub mod config;
pub mod jobs;
pub mod metrics;
pub mod notify;
pub mod poster;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::cache::{KvStore, RedisClient};
pub use crate::jobs::aggregate;
pub use crate::jobs::ledger::PostedLedger;
pub use crate::jobs::types::{JobSource, Listing, Priority, SearchCriteria, Source, SourceScope};
pub use crate::notify::{DigestSink, MessagePayload};
pub use crate::poster::{JobRunner, RunSummary};
