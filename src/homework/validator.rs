//! 响应校验 - 检查响应结构并取出作业列表

use crate::error::{PollError, ShapeError};
use serde_json::Value;

/// 响应中作业列表所在的 key
pub const HOMEWORKS_KEY: &str = "homeworks";

/// 校验响应并返回作业列表（保持原顺序）
///
/// 空列表返回 `PollError::EmptyResult`，与结构错误区分。
pub fn extract(response: &Value) -> Result<&[Value], PollError> {
    let object = response.as_object().ok_or(ShapeError::ExpectedMapping)?;
    let homeworks = object.get(HOMEWORKS_KEY).ok_or(ShapeError::MissingKey)?;
    let items = homeworks.as_array().ok_or(ShapeError::ExpectedSequence)?;

    if items.is_empty() {
        return Err(PollError::EmptyResult);
    }
    Ok(items)
}
