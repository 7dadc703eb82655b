// src/notify/discord.rs
use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

use super::{DigestSink, MessagePayload};

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Posts messages to one Discord channel through the bot REST API.
#[derive(Clone)]
pub struct DiscordPoster {
    token: String,
    channel_id: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl DiscordPoster {
    pub fn new(token: String, channel_id: String) -> Self {
        Self {
            token,
            channel_id,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<()> {
        let url = format!("{DISCORD_API_BASE}/channels/{}/messages", self.channel_id);

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&url)
                .timeout(self.timeout)
                .header("Authorization", format!("Bot {}", self.token))
                .json(payload)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("Discord channel message HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("Discord channel message request failed: {e}"));
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl DigestSink for DiscordPoster {
    async fn send(&self, message: &MessagePayload) -> Result<()> {
        self.post_message(message).await
    }
}
