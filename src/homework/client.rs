//! 作业状态 API 客户端
//!
//! 只负责发出带认证的 GET 请求并把响应体解析为 JSON，不做结构校验。

use crate::config::BotConfig;
use crate::error::PollError;
use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error};

/// 作业状态数据来源（轮询器通过该 trait 调用，测试中可替换）
pub trait HomeworkSource {
    /// 拉取 `from_date` 之后的作业状态
    fn fetch(&self, from_date: i64) -> Result<Value, PollError>;
}

/// Practicum API 客户端
pub struct ApiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.credentials.practicum_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HomeworkSource for ApiClient {
    fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let start = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .map_err(|e| {
                error!(
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Request to endpoint failed"
                );
                PollError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), elapsed_ms = start.elapsed().as_millis() as u64, "API request completed");

        if status != StatusCode::OK {
            error!(status = status.as_u16(), "API responded with non-200 status");
            return Err(PollError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| PollError::Transport(format!("failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "API response is not valid JSON");
            PollError::Decode(e.to_string())
        })
    }
}
