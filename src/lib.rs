//! Homework Status Bot - 轮询作业审核状态并通过 Telegram 通知

pub mod config;
pub mod error;
pub mod homework;
pub mod notification;
pub mod poller;

pub use config::{BotConfig, Credentials};
pub use error::{MissingCredentialsError, PollError, ShapeError};
pub use homework::{extract, render, ApiClient, HomeworkSource, HomeworkStatus, WorkItem};
pub use notification::{
    ConsoleChannel, DedupStrategy, MessageChannel, NoticeKind, NotificationDeduplicator, Notifier,
    SendResult, TelegramChannel, TelegramConfig,
};
pub use poller::{CycleOutcome, HomeworkPoller};
