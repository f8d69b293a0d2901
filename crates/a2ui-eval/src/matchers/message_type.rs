//! 顶层消息类型匹配器

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matcher::{SchemaMatcher, ValidationResult};

/// 要求负载的顶层键集合恰好是 `{message_type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTypeMatcher {
    pub message_type: String,
}

impl MessageTypeMatcher {
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
        }
    }
}

impl SchemaMatcher for MessageTypeMatcher {
    fn validate(&self, payload: &Value) -> ValidationResult {
        let Some(obj) = payload.as_object() else {
            return ValidationResult::fail("Response is not a valid object.");
        };

        if obj.len() == 1 && obj.contains_key(&self.message_type) {
            return ValidationResult::ok();
        }

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        ValidationResult::fail(format!(
            "Expected top-level message type to be '{}', but found '{}'",
            self.message_type,
            keys.join(", ")
        ))
    }

    fn description(&self) -> String {
        format!("Expected top-level message type to be '{}'", self.message_type)
    }
}
