//! 轮询器端到端场景测试
//!
//! 使用脚本化的数据源和记录型渠道，不访问网络

use anyhow::{anyhow, Result};
use homework_status_bot::{
    BotConfig, Credentials, CycleOutcome, DedupStrategy, HomeworkPoller, HomeworkSource,
    MessageChannel, Notifier, PollError,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

/// 每次 fetch 按顺序返回预设响应
struct ScriptedSource {
    script: RefCell<VecDeque<Result<Value, PollError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Value, PollError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
        }
    }
}

impl HomeworkSource for ScriptedSource {
    fn fetch(&self, _from_date: i64) -> Result<Value, PollError> {
        self.script
            .borrow_mut()
            .pop_front()
            .expect("fetch called more times than scripted")
    }
}

#[derive(Default)]
struct RecordingChannel {
    sent: RefCell<Vec<String>>,
    fail: bool,
}

impl MessageChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&self, text: &str) -> Result<()> {
        self.sent.borrow_mut().push(text.to_string());
        if self.fail {
            return Err(anyhow!("chat not found"));
        }
        Ok(())
    }
}

fn test_config() -> BotConfig {
    BotConfig::new(Credentials::new("practicum", "telegram", "100500"))
        .with_retry_interval(Duration::ZERO)
}

fn approved_hw1() -> Result<Value, PollError> {
    Ok(json!({"homeworks": [{"homework_name": "hw1", "status": "approved"}]}))
}

fn service_unavailable() -> Result<Value, PollError> {
    Err(PollError::UnexpectedStatus { status: 503 })
}

const APPROVED_HW1_TEXT: &str =
    "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!";

#[test]
fn test_scenario_single_status_notification() {
    let config = test_config();
    let source = ScriptedSource::new(vec![approved_hw1()]);
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

    let outcomes = poller.run_cycles(1).unwrap();

    assert_eq!(outcomes, vec![CycleOutcome::Notified(APPROVED_HW1_TEXT.to_string())]);
    assert_eq!(
        *poller.notifier().channel().sent.borrow(),
        vec![APPROVED_HW1_TEXT.to_string()]
    );
}

#[test]
fn test_scenario_identical_responses_notify_once() {
    for dedup in [DedupStrategy::Latest, DedupStrategy::History] {
        let config = test_config().with_dedup(dedup);
        let source = ScriptedSource::new(vec![approved_hw1(), approved_hw1()]);
        let mut poller =
            HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

        let outcomes = poller.run_cycles(2).unwrap();

        assert_eq!(outcomes[1], CycleOutcome::Skipped);
        assert_eq!(poller.notifier().channel().sent.borrow().len(), 1);
    }
}

#[test]
fn test_scenario_http_503_reported_once() {
    let config = test_config();
    let source = ScriptedSource::new(vec![service_unavailable(), service_unavailable()]);
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

    let outcomes = poller.run_cycles(2).unwrap();

    assert!(matches!(outcomes[0], CycleOutcome::ErrorNotified(_)));
    assert_eq!(outcomes[1], CycleOutcome::ErrorSuppressed);
    let sent = poller.notifier().channel().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Сбой в работе программы: "));
    assert!(sent[0].contains("503"));
}

#[test]
fn test_scenario_missing_chat_id_is_fatal() {
    let config = BotConfig::new(Credentials::new("practicum", "telegram", ""));
    let source = ScriptedSource::new(vec![approved_hw1()]);
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

    let err = poller.run().unwrap_err();

    assert_eq!(err.missing, vec!["TELEGRAM_CHAT_ID"]);
    assert_eq!(poller.cycles(), 0);
    assert!(poller.notifier().channel().sent.borrow().is_empty());
}

#[test]
fn test_recovery_after_error() {
    let config = test_config();
    let source = ScriptedSource::new(vec![service_unavailable(), approved_hw1()]);
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

    let outcomes = poller.run_cycles(2).unwrap();

    assert!(matches!(outcomes[0], CycleOutcome::ErrorNotified(_)));
    assert_eq!(outcomes[1], CycleOutcome::Notified(APPROVED_HW1_TEXT.to_string()));
}

#[test]
fn test_delivery_failure_does_not_stop_loop() {
    let config = test_config();
    let source = ScriptedSource::new(vec![approved_hw1(), approved_hw1(), service_unavailable()]);
    let channel = RecordingChannel {
        fail: true,
        ..Default::default()
    };
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(channel));

    let outcomes = poller.run_cycles(3).unwrap();

    // 发送失败的通知不会重试，去重记录照常更新
    assert!(matches!(outcomes[0], CycleOutcome::Notified(_)));
    assert_eq!(outcomes[1], CycleOutcome::Skipped);
    assert!(matches!(outcomes[2], CycleOutcome::ErrorNotified(_)));
    assert_eq!(poller.notifier().channel().sent.borrow().len(), 2);
}

#[test]
fn test_unknown_status_reported_as_error() {
    let config = test_config();
    let source = ScriptedSource::new(vec![Ok(
        json!({"homeworks": [{"homework_name": "hw1", "status": "on_hold"}]}),
    )]);
    let mut poller = HomeworkPoller::new(&config, source, Notifier::new(RecordingChannel::default()));

    let outcome = poller.run_cycle();

    match outcome {
        CycleOutcome::ErrorNotified(text) => assert!(text.contains("on_hold")),
        other => panic!("unexpected outcome: {:?}", other),
    }
}
