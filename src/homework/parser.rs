//! 状态解析 - 从作业条目中取出名称和状态并生成通知文本

use super::status::HomeworkStatus;
use crate::error::PollError;
use serde_json::Value;

/// 已校验的作业条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub name: String,
    pub status: HomeworkStatus,
}

impl WorkItem {
    pub fn from_value(item: &Value) -> Result<Self, PollError> {
        let name = required_str(item, "homework_name")?;
        let code = required_str(item, "status")?;
        let status = HomeworkStatus::from_code(code).ok_or_else(|| PollError::UnknownStatus {
            status: code.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    pub fn notification_text(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn required_str<'a>(item: &'a Value, field: &'static str) -> Result<&'a str, PollError> {
    item.get(field)
        .and_then(Value::as_str)
        .ok_or(PollError::MalformedItem { field })
}

/// 把单个作业条目渲染为通知文本
pub fn render(item: &Value) -> Result<String, PollError> {
    WorkItem::from_value(item).map(|w| w.notification_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_each_known_status() {
        let cases = [
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ];
        for (code, verdict) in cases {
            let text = render(&json!({"homework_name": "hw1", "status": code})).unwrap();
            assert_eq!(
                text,
                format!("Изменился статус проверки работы \"hw1\". {}", verdict)
            );
        }
    }

    #[test]
    fn test_render_ignores_extra_fields() {
        let item = json!({
            "id": 123,
            "homework_name": "user__hw_api.zip",
            "status": "rejected",
            "reviewer_comment": "Поправь тесты",
            "date_updated": "2024-01-01T00:00:00Z"
        });
        let parsed = WorkItem::from_value(&item).unwrap();
        assert_eq!(parsed.name, "user__hw_api.zip");
        assert_eq!(parsed.status, HomeworkStatus::Rejected);
    }

    #[test]
    fn test_render_unknown_status() {
        let err = render(&json!({"homework_name": "hw1", "status": "pending"})).unwrap_err();
        match err {
            PollError::UnknownStatus { status } => assert_eq!(status, "pending"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_render_missing_fields() {
        let err = render(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, PollError::MalformedItem { field: "homework_name" }));

        let err = render(&json!({"homework_name": "hw1"})).unwrap_err();
        assert!(matches!(err, PollError::MalformedItem { field: "status" }));
    }

    #[test]
    fn test_render_non_string_field_is_malformed() {
        let err = render(&json!({"homework_name": 42, "status": "approved"})).unwrap_err();
        assert!(matches!(err, PollError::MalformedItem { field: "homework_name" }));
    }
}
