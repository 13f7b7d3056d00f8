//! 作业状态 API - 请求、响应校验与状态解析

pub mod client;
pub mod parser;
pub mod status;
pub mod validator;

pub use client::{ApiClient, HomeworkSource};
pub use parser::{render, WorkItem};
pub use status::HomeworkStatus;
pub use validator::extract;
