//! 消息渠道 trait 定义

use anyhow::Result;

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 发送失败（已记录日志，不重试）
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

/// 消息渠道 trait
pub trait MessageChannel {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送一条纯文本消息
    fn send(&self, text: &str) -> Result<()>;
}

impl<C: MessageChannel + ?Sized> MessageChannel for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(&self, text: &str) -> Result<()> {
        (**self).send(text)
    }
}
