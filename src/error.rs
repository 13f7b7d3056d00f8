//! 错误类型
//!
//! 单次轮询内的错误都是 `PollError`，由轮询循环统一转换为一条去重后的错误通知；
//! 只有 `MissingCredentialsError` 会让进程退出。

use thiserror::Error;

/// 响应结构不符合预期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected mapping")]
    ExpectedMapping,
    #[error("missing key")]
    MissingKey,
    #[error("expected sequence")]
    ExpectedSequence,
}

/// 单个轮询周期内可能出现的错误
#[derive(Debug, Error)]
pub enum PollError {
    /// 连接失败、超时等
    #[error("Сбой при запросе к endpoint: {0}")]
    Transport(String),

    #[error("Статус ответа API не 200, статус {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Ответ API не является JSON: {0}")]
    Decode(String),

    #[error("Некорректный ответ API: {0}")]
    Shape(#[from] ShapeError),

    #[error("The list is empty")]
    EmptyResult,

    #[error("Нет ключа в homework: {field}")]
    MalformedItem { field: &'static str },

    #[error("Некорректный статус работы: {status}")]
    UnknownStatus { status: String },
}

impl PollError {
    /// 错误种类名（用于结构化日志）
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Transport(_) => "transport",
            PollError::UnexpectedStatus { .. } => "unexpected_status",
            PollError::Decode(_) => "decode",
            PollError::Shape(_) => "shape",
            PollError::EmptyResult => "empty_result",
            PollError::MalformedItem { .. } => "malformed_item",
            PollError::UnknownStatus { .. } => "unknown_status",
        }
    }

    /// 渲染为发送给用户的错误通知
    pub fn notification_text(&self) -> String {
        format!("Сбой в работе программы: {}", self)
    }
}

/// 缺少必需的凭据，致命错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required credentials: {}", .missing.join(", "))]
pub struct MissingCredentialsError {
    pub missing: Vec<&'static str>,
}
