// src/config.rs
//! Environment-backed configuration. Required values fail fast at startup;
//! absent provider credentials disable the matching adapter. The curated
//! keyword list can be overridden by a TOML or JSON file.

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const ENV_KEYWORDS_PATH: &str = "JOB_KEYWORDS_PATH";

pub const DEFAULT_JOB_CRON: &str = "0 0 14 * * *";
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,

    // Ledger store (required)
    pub redis_rest_url: String,
    pub redis_rest_token: String,

    // Discord (token required; channel optional — posting disabled without it)
    pub discord_token: String,
    pub job_channel_id: Option<String>,

    // Provider credentials; absence disables the adapter
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub themuse_api_key: Option<String>,
    pub creatorjobs_feed_url: Option<String>,

    // Schedule
    pub job_cron: String,
    pub timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let timezone_name = optional("DEFAULT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| anyhow!("DEFAULT_TIMEZONE '{timezone_name}' is not a known timezone"))?;

        Ok(Self {
            bind_addr,
            redis_rest_url: required("UPSTASH_REDIS_URL")?,
            redis_rest_token: required("UPSTASH_REDIS_TOKEN")?,
            discord_token: required("DISCORD_TOKEN")?,
            job_channel_id: optional("JOB_CHANNEL_ID"),
            adzuna_app_id: optional("ADZUNA_APP_ID"),
            adzuna_app_key: optional("ADZUNA_APP_KEY"),
            themuse_api_key: optional("THEMUSE_API_KEY"),
            creatorjobs_feed_url: optional("CREATORJOBS_FEED_URL"),
            job_cron: optional("JOB_CRON").unwrap_or_else(|| DEFAULT_JOB_CRON.into()),
            timezone,
        })
    }
}

fn required(name: &str) -> Result<String> {
    match optional(name) {
        Some(v) => Ok(v),
        None => Err(anyhow!("required environment variable {name} is not set")),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load a keyword override list from an explicit path. Supports TOML
/// (`keywords = [...]`) or a bare JSON array.
pub fn load_keywords_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading keyword list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_keywords(&content, ext.as_str())
}

/// Load keyword overrides using env var + fallbacks:
/// 1) $JOB_KEYWORDS_PATH
/// 2) config/job_keywords.toml
/// 3) config/job_keywords.json
/// Returns `None` when no override exists (use the built-in list).
pub fn load_keywords_default() -> Result<Option<Vec<String>>> {
    if let Ok(p) = std::env::var(ENV_KEYWORDS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_keywords_from(&pb).map(Some);
        }
        return Err(anyhow!("JOB_KEYWORDS_PATH points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/job_keywords.toml");
    if toml_p.exists() {
        return load_keywords_from(&toml_p).map(Some);
    }
    let json_p = PathBuf::from("config/job_keywords.json");
    if json_p.exists() {
        return load_keywords_from(&json_p).map(Some);
    }
    Ok(None)
}

fn parse_keywords(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    let try_toml = hint_ext == "toml" || s.contains("keywords");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported keyword list format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct KeywordFile {
        keywords: Vec<String>,
    }
    let v: KeywordFile = toml::from_str(s)?;
    Ok(clean_list(v.keywords))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_formats_dedup_and_trim() {
        let toml = r#"keywords = [" Talent Manager ", "", "community manager", "community manager"]"#;
        let json = r#"["Creator Relations", "  ops coordinator  ", ""]"#;
        assert_eq!(
            parse_toml(toml).unwrap(),
            vec!["talent manager".to_string(), "community manager".to_string()]
        );
        assert_eq!(
            parse_json(json).unwrap(),
            vec!["creator relations".to_string(), "ops coordinator".to_string()]
        );
    }

    #[test]
    fn keyword_order_is_preserved() {
        let json = r#"["zeta", "alpha", "zeta"]"#;
        assert_eq!(
            parse_json(json).unwrap(),
            vec!["zeta".to_string(), "alpha".to_string()]
        );
    }

    #[serial_test::serial]
    #[test]
    fn required_env_missing_is_an_error() {
        std::env::remove_var("UPSTASH_REDIS_URL");
        assert!(required("UPSTASH_REDIS_URL").is_err());
        std::env::set_var("UPSTASH_REDIS_URL", "https://cache.example");
        assert_eq!(
            required("UPSTASH_REDIS_URL").unwrap(),
            "https://cache.example"
        );
        std::env::remove_var("UPSTASH_REDIS_URL");
    }

    #[serial_test::serial]
    #[test]
    fn blank_env_values_count_as_absent() {
        std::env::set_var("JOB_CHANNEL_ID", "   ");
        assert_eq!(optional("JOB_CHANNEL_ID"), None);
        std::env::remove_var("JOB_CHANNEL_ID");
    }

    #[serial_test::serial]
    #[test]
    fn dangling_keyword_path_is_an_error() {
        std::env::set_var(ENV_KEYWORDS_PATH, "/definitely/not/here.toml");
        assert!(load_keywords_default().is_err());
        std::env::remove_var(ENV_KEYWORDS_PATH);
    }
}
