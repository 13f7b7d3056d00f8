//! Telegram 渠道（Bot API sendMessage）

use crate::config::BotConfig;
use crate::notification::channel::MessageChannel;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Telegram Bot API 地址
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Telegram 渠道配置
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Bot API 地址（支持自建 Bot API 服务）
    pub api_url: String,
    pub timeout: std::time::Duration,
}

impl TelegramConfig {
    pub fn from_bot_config(config: &BotConfig) -> Self {
        Self {
            bot_token: config.credentials.telegram_token.clone(),
            chat_id: config.credentials.telegram_chat_id.clone(),
            api_url: TELEGRAM_API_URL.to_string(),
            timeout: config.request_timeout,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// sendMessage 请求体
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API 响应
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram 渠道
pub struct TelegramChannel {
    client: reqwest::blocking::Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(anyhow!("bot_token is required"));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

impl MessageChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            // reqwest 的错误信息里带有 URL，其中包含 bot token
            .map_err(|e| anyhow!("Telegram request failed: {}", e.without_url()))?;

        let status = response.status();
        let body: BotApiResponse = response
            .json()
            .map_err(|e| anyhow!("Failed to parse Telegram response ({}): {}", status, e.without_url()))?;

        if !status.is_success() || !body.ok {
            return Err(anyhow!(
                "Telegram API error ({}): {}",
                status,
                body.description.unwrap_or_else(|| "Unknown error".to_string())
            ));
        }

        debug!(chat_id = %self.config.chat_id, "Telegram message accepted");
        Ok(())
    }
}
