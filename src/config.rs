//! 配置 - 凭据与运行参数
//!
//! 启动时构造一次 `BotConfig`，之后以引用方式传给 API 客户端、Telegram 渠道和轮询器。

use crate::error::MissingCredentialsError;
use crate::notification::DedupStrategy;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// 作业状态 API 地址
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// 轮询间隔（秒）
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// HTTP 请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// 三个必需的密钥，空字符串视为缺失
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

// 不把 token 打进日志
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &mask(&self.practicum_token))
            .field("telegram_token", &mask(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Credentials {
    pub fn new(
        practicum_token: impl Into<String>,
        telegram_token: impl Into<String>,
        telegram_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            practicum_token: practicum_token.into(),
            telegram_token: telegram_token.into(),
            telegram_chat_id: telegram_chat_id.into(),
        }
    }

    /// 从任意 key 查找函数构造（缺失的 key 记为空字符串）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();
        Self {
            practicum_token: get(PRACTICUM_TOKEN_VAR),
            telegram_token: get(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: get(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从 dotenv 文件读取，不修改进程环境
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let mut vars = HashMap::new();
        let iter = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to open env file {}", path.display()))?;
        for item in iter {
            let (key, value) =
                item.with_context(|| format!("Failed to parse env file {}", path.display()))?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), keys = vars.len(), "Loaded credentials from env file");
        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    /// 缺失的环境变量名
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// 三个密钥都存在时返回 true
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn require(&self) -> Result<(), MissingCredentialsError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingCredentialsError { missing })
        }
    }
}

/// 机器人运行配置（不可变）
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub credentials: Credentials,
    /// 作业状态 API 地址
    pub endpoint: String,
    /// 两次轮询之间的固定间隔
    pub retry_interval: Duration,
    pub request_timeout: Duration,
    /// 固定的 from_date；为 None 时在第一次轮询时取当前时间
    pub from_date: Option<i64>,
    pub dedup: DedupStrategy,
}

impl BotConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            from_date: None,
            dedup: DedupStrategy::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_from_date(mut self, from_date: Option<i64>) -> Self {
        self.from_date = from_date;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupStrategy) -> Self {
        self.dedup = dedup;
        self
    }
}
