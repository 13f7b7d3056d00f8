//! Homework Status Bot CLI
//!
//! 轮询 Practicum 作业状态 API，审核状态变化时发送 Telegram 通知

use anyhow::Result;
use clap::{Parser, Subcommand};
use homework_status_bot::{
    ApiClient, BotConfig, ConsoleChannel, CycleOutcome, DedupStrategy, HomeworkPoller,
    HomeworkStatus, MessageChannel, Notifier, TelegramChannel, TelegramConfig,
};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hwbot")]
#[command(about = "Homework Status Bot - 作业审核状态变化时发送 Telegram 通知")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 持续轮询并发送通知
    Run {
        /// 轮询间隔（秒）
        #[arg(long, short, default_value_t = homework_status_bot::config::DEFAULT_RETRY_SECS)]
        interval: u64,
        #[command(flatten)]
        poll: PollArgs,
        /// 去重策略
        #[arg(long, value_enum, default_value_t = DedupStrategy::Latest)]
        dedup: DedupStrategy,
    },
    /// 只执行一次轮询
    Check {
        #[command(flatten)]
        poll: PollArgs,
        /// Dry-run 模式（只打印不发送）
        #[arg(long)]
        dry_run: bool,
    },
    /// 列出已知的作业状态
    Statuses {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct PollArgs {
    /// 作业状态 API 地址
    #[arg(long, default_value = homework_status_bot::config::DEFAULT_ENDPOINT)]
    endpoint: String,
    /// 固定的 from_date（Unix 秒，默认取第一次轮询时的当前时间）
    #[arg(long)]
    from_date: Option<i64>,
    /// HTTP 请求超时（秒）
    #[arg(long, default_value_t = homework_status_bot::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl PollArgs {
    fn apply(self, config: BotConfig) -> BotConfig {
        config
            .with_endpoint(self.endpoint)
            .with_from_date(self.from_date)
            .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

fn telegram_channel(config: &BotConfig) -> Result<Box<dyn MessageChannel>> {
    let channel = TelegramChannel::new(TelegramConfig::from_bot_config(config))?;
    Ok(Box::new(channel))
}

fn main() -> Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug hwbot run
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=info,hwbot=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { interval, poll, dedup } => {
            let config = poll
                .apply(BotConfig::from_env())
                .with_retry_interval(Duration::from_secs(interval))
                .with_dedup(dedup);

            if let Err(e) = config.credentials.require() {
                error!(missing = ?e.missing, "Required credentials are missing");
                return Err(e.into());
            }

            let client = ApiClient::new(&config)?;
            let notifier = Notifier::new(telegram_channel(&config)?);
            let mut poller = HomeworkPoller::new(&config, client, notifier);
            poller.run()?;
        }
        Commands::Check { poll, dry_run } => {
            let config = poll.apply(BotConfig::from_env());

            if let Err(e) = config.credentials.require() {
                error!(missing = ?e.missing, "Required credentials are missing");
                return Err(e.into());
            }

            let channel: Box<dyn MessageChannel> = if dry_run {
                Box::new(ConsoleChannel::new())
            } else {
                telegram_channel(&config)?
            };
            let client = ApiClient::new(&config)?;
            let mut poller = HomeworkPoller::new(&config, client, Notifier::new(channel));

            for outcome in poller.run_cycles(1)? {
                match outcome {
                    CycleOutcome::Notified(_) => info!("Status notification sent"),
                    CycleOutcome::ErrorNotified(_) => info!("Error notification sent"),
                    CycleOutcome::Skipped | CycleOutcome::ErrorSuppressed => {
                        info!("Nothing to send")
                    }
                }
            }
        }
        Commands::Statuses { json } => {
            if json {
                let statuses: Vec<_> = HomeworkStatus::ALL
                    .iter()
                    .map(|s| serde_json::json!({"status": s, "verdict": s.verdict()}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in HomeworkStatus::ALL {
                    println!("  {:<10} {}", status.code(), status.verdict());
                }
            }
        }
    }

    Ok(())
}
