//! 控制台渠道 - 把消息打印到标准输出（dry-run 使用）

use crate::notification::channel::MessageChannel;
use anyhow::Result;

pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    fn send(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}
