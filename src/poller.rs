//! 轮询器 - 定时拉取作业状态，状态变化时发送通知
//!
//! 每个周期：fetch → extract → render(第一条作业) → 去重 → 发送，然后固定休眠。
//! 周期内的任何 `PollError` 都转换为一条错误通知（同样经过去重），不会中断循环；
//! 只有缺少凭据会让循环返回错误。

use crate::config::BotConfig;
use crate::error::{MissingCredentialsError, PollError};
use crate::homework::{extract, render, HomeworkSource};
use crate::notification::{MessageChannel, NoticeKind, NotificationDeduplicator, Notifier};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 单个周期的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 状态变化，已发送通知
    Notified(String),
    /// 状态未变化
    Skipped,
    /// 出错，已发送错误通知
    ErrorNotified(String),
    /// 出错，但同样的错误已经通知过
    ErrorSuppressed,
}

/// 作业状态轮询器
pub struct HomeworkPoller<'a, S: HomeworkSource, C: MessageChannel> {
    config: &'a BotConfig,
    source: S,
    notifier: Notifier<C>,
    dedup: NotificationDeduplicator,
    /// 第一次轮询时确定，之后不再前移
    from_date: Option<i64>,
    cycles: u64,
}

impl<'a, S: HomeworkSource, C: MessageChannel> HomeworkPoller<'a, S, C> {
    pub fn new(config: &'a BotConfig, source: S, notifier: Notifier<C>) -> Self {
        Self {
            config,
            source,
            notifier,
            dedup: NotificationDeduplicator::new(config.dedup),
            from_date: config.from_date,
            cycles: 0,
        }
    }

    pub fn notifier(&self) -> &Notifier<C> {
        &self.notifier
    }

    pub fn deduplicator(&self) -> &NotificationDeduplicator {
        &self.dedup
    }

    /// 当前使用的 from_date（首次轮询前为 None）
    pub fn from_date(&self) -> Option<i64> {
        self.from_date
    }

    /// 已执行的周期数
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// 无限循环，只在缺少凭据时返回
    pub fn run(&mut self) -> Result<(), MissingCredentialsError> {
        info!(
            endpoint = %self.config.endpoint,
            interval_secs = self.config.retry_interval.as_secs(),
            dedup = ?self.config.dedup,
            "Homework poller started"
        );
        loop {
            self.ensure_credentials()?;
            self.run_cycle();
            self.sleep();
        }
    }

    /// 执行 n 个周期，周期之间休眠（最后一个周期后不休眠）
    pub fn run_cycles(&mut self, n: usize) -> Result<Vec<CycleOutcome>, MissingCredentialsError> {
        let mut outcomes = Vec::with_capacity(n);
        for i in 0..n {
            self.ensure_credentials()?;
            outcomes.push(self.run_cycle());
            if i + 1 < n {
                self.sleep();
            }
        }
        Ok(outcomes)
    }

    fn ensure_credentials(&self) -> Result<(), MissingCredentialsError> {
        self.config.credentials.require().map_err(|e| {
            error!(missing = ?e.missing, "Required credentials are missing, stopping");
            e
        })
    }

    fn sleep(&self) {
        debug!(secs = self.config.retry_interval.as_secs(), "Sleeping until next cycle");
        if self.config.retry_interval > Duration::ZERO {
            std::thread::sleep(self.config.retry_interval);
        }
    }

    /// 执行一个周期（不检查凭据、不休眠）
    pub fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        let from_date = *self.from_date.get_or_insert_with(|| Utc::now().timestamp());

        match self.poll(from_date) {
            Ok(message) => self.emit_status(message),
            Err(e) => self.emit_error(e),
        }
    }

    fn poll(&self, from_date: i64) -> Result<String, PollError> {
        let response = self.source.fetch(from_date)?;
        let homeworks = extract(&response)?;
        render(&homeworks[0])
    }

    fn emit_status(&mut self, message: String) -> CycleOutcome {
        if !self.dedup.should_emit(NoticeKind::Status, &message) {
            debug!(cycle = self.cycles, "Homework status unchanged");
            return CycleOutcome::Skipped;
        }
        info!(cycle = self.cycles, "Homework status changed");
        self.notifier.send(&message);
        CycleOutcome::Notified(message)
    }

    fn emit_error(&mut self, e: PollError) -> CycleOutcome {
        match &e {
            PollError::EmptyResult => {
                warn!(cycle = self.cycles, kind = e.kind(), "No homeworks in response")
            }
            _ => error!(cycle = self.cycles, kind = e.kind(), error = %e, "Poll cycle failed"),
        }

        let message = e.notification_text();
        if !self.dedup.should_emit(NoticeKind::Error, &message) {
            debug!(cycle = self.cycles, kind = e.kind(), "Error already reported");
            return CycleOutcome::ErrorSuppressed;
        }
        self.notifier.send(&message);
        CycleOutcome::ErrorNotified(message)
    }
}
