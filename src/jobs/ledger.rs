// src/jobs/ledger.rs
//! Persistent record of already-posted listing ids, with expiry.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use crate::cache::KvStore;
use crate::jobs::types::Listing;

pub const POSTED_KEY_PREFIX: &str = "job:posted:";
/// Entries expire after 30 days, after which a listing may resurface.
pub const POSTED_TTL_SECS: u64 = 60 * 60 * 24 * 30;

/// Deduplication ledger over an injected [`KvStore`].
///
/// Reads are fail-closed: if the store is unreachable we report the listing
/// as already posted, preferring a missed posting over a duplicate during an
/// outage. Writes are best-effort; a lost write only means the listing can
/// resurface on a later run.
#[derive(Clone)]
pub struct PostedLedger {
    store: Arc<dyn KvStore>,
}

impl PostedLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key(id: &str) -> String {
        format!("{POSTED_KEY_PREFIX}{id}")
    }

    /// Has this listing been posted within the TTL window? Fail-closed.
    pub async fn is_posted(&self, id: &str) -> bool {
        match self.store.exists(&Self::key(id)).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    job_id = id,
                    "ledger check failed, treating listing as already posted"
                );
                true
            }
        }
    }

    /// Record a posted listing with the 30-day expiry. Never raises.
    pub async fn mark_posted(&self, id: &str) {
        let posted_at = Utc::now().to_rfc3339();
        if let Err(e) = self
            .store
            .set_ex(&Self::key(id), &posted_at, POSTED_TTL_SECS)
            .await
        {
            tracing::error!(error = ?e, job_id = id, "failed to mark listing as posted");
        }
    }

    pub async fn mark_all_posted(&self, listings: &[Listing]) {
        for listing in listings {
            self.mark_posted(&listing.id).await;
        }
        tracing::info!(count = listings.len(), "marked listings as posted");
    }

    /// Administrative bulk clear: delete every ledger key. Returns the number
    /// of entries removed.
    pub async fn clear(&self) -> Result<usize> {
        let keys = self
            .store
            .keys(&format!("{POSTED_KEY_PREFIX}*"))
            .await?;
        let mut deleted = 0usize;
        for key in &keys {
            if self.store.del(key).await? {
                deleted += 1;
            }
        }
        tracing::info!(cleared = deleted, "job ledger cleared");
        Ok(deleted)
    }

    /// Number of ledger entries currently live.
    pub async fn count(&self) -> Result<usize> {
        let keys = self
            .store
            .keys(&format!("{POSTED_KEY_PREFIX}*"))
            .await?;
        Ok(keys.len())
    }
}
