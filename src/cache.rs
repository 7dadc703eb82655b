// src/cache.rs
//! Key-value cache client speaking the Upstash-style REST protocol:
//! commands are path segments, auth is a bearer token, and responses come
//! back as a `{"result": ...}` envelope.

use anyhow::{anyhow, Context, Result};
use metrics::counter;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal key-value surface the ledger needs. Implemented by [`RedisClient`];
/// tests substitute in-memory or failing stores.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool>;
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;
    async fn del(&self, key: &str) -> Result<bool>;
    /// Glob-style key scan (`KEYS pattern`). Only used by administrative
    /// operations; never on the hot path.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct RedisResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct RedisClient {
    base_url: String,
    token: String,
    client: Client,
}

impl RedisClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    async fn execute<T: serde::de::DeserializeOwned>(&self, command: &[&str]) -> Result<T> {
        let op = command
            .first()
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_default();
        let url = format!("{}/{}", self.base_url, command.join("/"));

        let res = async {
            let rsp = self
                .client
                .get(&url)
                .timeout(REQUEST_TIMEOUT)
                .bearer_auth(&self.token)
                .send()
                .await
                .context("cache request failed")?;
            let rsp = rsp
                .error_for_status()
                .context("cache returned error status")?;
            let body: RedisResponse<T> = rsp.json().await.context("decoding cache response")?;
            if let Some(err) = body.error {
                return Err(anyhow!("cache command error: {err}"));
            }
            body.result
                .ok_or_else(|| anyhow!("cache response missing result"))
        }
        .await;

        match &res {
            Ok(_) => {
                counter!("cache_operations_total", "operation" => op, "status" => "success")
                    .increment(1)
            }
            Err(e) => {
                tracing::error!(error = ?e, command = ?command, "cache operation failed");
                counter!("cache_operations_total", "operation" => op, "status" => "error")
                    .increment(1);
            }
        }

        res
    }
}

#[async_trait::async_trait]
impl KvStore for RedisClient {
    async fn exists(&self, key: &str) -> Result<bool> {
        let n: i64 = self.execute(&["EXISTS", key]).await?;
        Ok(n == 1)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let ttl = ttl_secs.to_string();
        let _: String = self.execute(&["SET", key, value, "EX", &ttl]).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let n: i64 = self.execute(&["DEL", key]).await?;
        Ok(n == 1)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.execute(&["KEYS", pattern]).await
    }
}
