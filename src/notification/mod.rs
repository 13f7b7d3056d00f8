//! 通知层 - 消息渠道、发送器与去重
//!
//! # 使用示例
//! ```ignore
//! use homework_status_bot::notification::{ConsoleChannel, Notifier};
//!
//! let notifier = Notifier::new(ConsoleChannel::new());
//! notifier.send("Hello");
//! ```

pub mod channel;
pub mod channels;
pub mod deduplicator;
pub mod notifier;

pub use channel::{MessageChannel, SendResult};
pub use channels::{ConsoleChannel, TelegramChannel, TelegramConfig};
pub use deduplicator::{DedupStrategy, NoticeKind, NotificationDeduplicator};
pub use notifier::Notifier;
