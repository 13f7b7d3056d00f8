//! 通知发送器 - 向固定的目标渠道投递文本
//!
//! 投递失败只记录日志，不重试也不向上传播，失败的通知直接丢弃。

use super::channel::{MessageChannel, SendResult};
use tracing::{error, info};

pub struct Notifier<C: MessageChannel> {
    channel: C,
}

impl<C: MessageChannel> Notifier<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn send(&self, text: &str) -> SendResult {
        match self.channel.send(text) {
            Ok(()) => {
                info!(channel = %self.channel.name(), message = %text, "Message sent");
                SendResult::Sent
            }
            Err(e) => {
                error!(
                    channel = %self.channel.name(),
                    error = %e,
                    "Failed to send message"
                );
                SendResult::Failed(e.to_string())
            }
        }
    }
}
