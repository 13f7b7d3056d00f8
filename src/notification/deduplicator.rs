//! 通知去重器 - 同样的文本只发送一次
//!
//! 状态通知和错误通知分开记录。默认策略 `Latest` 只保留每类最近发出的一条文本，
//! `History` 保留所有发出过的文本（进程生命周期内无上限增长）。

use clap::ValueEnum;
use tracing::debug;

/// 通知种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// 作业状态变化
    Status,
    /// 程序故障
    Error,
}

/// 去重策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DedupStrategy {
    /// 每类只与最近一次发出的文本比较
    #[default]
    Latest,
    /// 与所有发出过的文本比较
    History,
}

/// 通知去重器
#[derive(Debug, Default)]
pub struct NotificationDeduplicator {
    strategy: DedupStrategy,
    last_status: Option<String>,
    last_error: Option<String>,
    history: Vec<String>,
}

impl NotificationDeduplicator {
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn strategy(&self) -> DedupStrategy {
        self.strategy
    }

    fn slot(&self, kind: NoticeKind) -> Option<&str> {
        match kind {
            NoticeKind::Status => self.last_status.as_deref(),
            NoticeKind::Error => self.last_error.as_deref(),
        }
    }

    /// 文本是否从未发出过（不修改状态）
    pub fn is_new(&self, kind: NoticeKind, text: &str) -> bool {
        match self.strategy {
            DedupStrategy::Latest => self.slot(kind) != Some(text),
            DedupStrategy::History => !self.history.iter().any(|t| t == text),
        }
    }

    /// 记录已发出的文本
    pub fn record(&mut self, kind: NoticeKind, text: &str) {
        match self.strategy {
            DedupStrategy::Latest => {
                let slot = match kind {
                    NoticeKind::Status => &mut self.last_status,
                    NoticeKind::Error => &mut self.last_error,
                };
                *slot = Some(text.to_string());
            }
            DedupStrategy::History => {
                if !self.history.iter().any(|t| t == text) {
                    self.history.push(text.to_string());
                }
            }
        }
    }

    /// 检查是否应该发送；返回 true 时同时记录该文本
    pub fn should_emit(&mut self, kind: NoticeKind, text: &str) -> bool {
        if !self.is_new(kind, text) {
            debug!(kind = ?kind, strategy = ?self.strategy, "Notification deduplicated");
            return false;
        }
        self.record(kind, text);
        true
    }

    /// 已记录的文本条数
    pub fn len(&self) -> usize {
        match self.strategy {
            DedupStrategy::Latest => {
                self.last_status.is_some() as usize + self.last_error.is_some() as usize
            }
            DedupStrategy::History => self.history.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
