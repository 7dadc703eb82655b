// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use jobwire::cache::KvStore;
use jobwire::jobs::types::{JobSource, Listing, Priority, Source, SourceScope};
use jobwire::notify::{DigestSink, MessagePayload};

pub fn listing(id: &str, priority: Priority, posted: DateTime<Utc>) -> Listing {
    Listing {
        id: id.to_string(),
        title: "Community Manager".to_string(),
        company: "Acme Media".to_string(),
        location: "Remote".to_string(),
        description: "Grow and moderate our community.".to_string(),
        url: format!("https://example.test/{id}"),
        salary: None,
        posted,
        priority,
        source: Source::Adzuna,
    }
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, d, 12, 0, 0).unwrap()
}

/// In-memory KvStore with glob-prefix `keys` support.
#[derive(Default)]
pub struct MemoryStore {
    pub data: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.data.lock().unwrap().contains_key(key))
    }

    async fn set_ex(&self, key: &str, value: &str, _ttl_secs: u64) -> Result<()> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        Ok(self.data.lock().unwrap().remove(key).is_some())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let prefix = pattern.trim_end_matches('*');
        Ok(self
            .data
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Store where every operation fails, simulating a cache outage.
pub struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    async fn exists(&self, _key: &str) -> Result<bool> {
        Err(anyhow!("cache unreachable"))
    }
    async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<()> {
        Err(anyhow!("cache unreachable"))
    }
    async fn del(&self, _key: &str) -> Result<bool> {
        Err(anyhow!("cache unreachable"))
    }
    async fn keys(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(anyhow!("cache unreachable"))
    }
}

/// Keyword-scoped source returning a fixed set for every keyword requested,
/// recording the keywords it saw.
pub struct KeywordSource {
    pub listings: Vec<Listing>,
    pub seen_keywords: Mutex<Vec<String>>,
}

impl KeywordSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            seen_keywords: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl JobSource for KeywordSource {
    async fn fetch(&self, keyword: Option<&str>, _max_age_days: u32) -> Result<Vec<Listing>> {
        if let Some(kw) = keyword {
            self.seen_keywords.lock().unwrap().push(kw.to_string());
        }
        Ok(self.listings.clone())
    }
    fn name(&self) -> &'static str {
        "mock-keyword"
    }
    fn scope(&self) -> SourceScope {
        SourceScope::Keyword
    }
}

/// Catalog-scoped source counting how many times it was fetched.
pub struct CatalogSource {
    pub listings: Vec<Listing>,
    pub fetch_count: AtomicUsize,
}

impl CatalogSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fetch_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl JobSource for CatalogSource {
    async fn fetch(&self, _keyword: Option<&str>, _max_age_days: u32) -> Result<Vec<Listing>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.listings.clone())
    }
    fn name(&self) -> &'static str {
        "mock-catalog"
    }
    fn scope(&self) -> SourceScope {
        SourceScope::Catalog
    }
}

/// Source that always errors, simulating a provider outage.
pub struct BrokenSource;

#[async_trait]
impl JobSource for BrokenSource {
    async fn fetch(&self, _keyword: Option<&str>, _max_age_days: u32) -> Result<Vec<Listing>> {
        Err(anyhow!("provider down"))
    }
    fn name(&self) -> &'static str {
        "mock-broken"
    }
    fn scope(&self) -> SourceScope {
        SourceScope::Keyword
    }
}

/// Delegating wrapper so a test can keep an `Arc` handle to a mock source
/// while the pipeline owns the boxed trait object.
pub struct SharedSource<S: JobSource>(pub std::sync::Arc<S>);

#[async_trait]
impl<S: JobSource> JobSource for SharedSource<S> {
    async fn fetch(&self, keyword: Option<&str>, max_age_days: u32) -> Result<Vec<Listing>> {
        self.0.fetch(keyword, max_age_days).await
    }
    fn name(&self) -> &'static str {
        self.0.name()
    }
    fn scope(&self) -> SourceScope {
        self.0.scope()
    }
}

/// Sink recording every message it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<MessagePayload>>,
}

#[async_trait]
impl DigestSink for RecordingSink {
    async fn send(&self, message: &MessagePayload) -> Result<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Sink that fails on embed sends but accepts plain text.
#[derive(Default)]
pub struct FlakySink {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl DigestSink for FlakySink {
    async fn send(&self, message: &MessagePayload) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if message.embeds.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("send rejected"))
        }
    }
}
