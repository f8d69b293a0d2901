//! 组件匹配器
//!
//! 在 `surfaceUpdate.components` 中查找指定类型的组件，可选地要求某个属性存在，
//! 并在该属性值中做不区分大小写的递归文本搜索。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matcher::{SchemaMatcher, ValidationResult};
use crate::protocol::truthy_field;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentUpdateSchemaMatcher {
    /// 组件类型标签，例如 `Text`
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_text: Option<String>,
}

impl ComponentUpdateSchemaMatcher {
    pub fn new(
        component_name: impl Into<String>,
        property_name: Option<&str>,
        match_text: Option<&str>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            property_name: property_name.map(str::to_string),
            match_text: match_text.map(str::to_string),
        }
    }

    fn property(&self) -> Option<&str> {
        self.property_name.as_deref().filter(|p| !p.is_empty())
    }

    fn text(&self) -> Option<&str> {
        self.match_text.as_deref().filter(|t| !t.is_empty())
    }

    /// 单个组件是否满足全部已配置的条件
    fn matches(&self, component: &Value) -> bool {
        let Some(properties) = component
            .get("componentProperties")
            .and_then(|cp| truthy_field(cp, &self.component_name))
        else {
            return false;
        };

        let Some(property_name) = self.property() else {
            return true;
        };
        let Some(property) = truthy_field(properties, property_name) else {
            return false;
        };

        match self.text() {
            None => true,
            Some(text) => contains_text(property, &text.to_lowercase()),
        }
    }

    fn failure_message(&self) -> String {
        let mut error = format!("Failed to find component '{}'", self.component_name);
        if let Some(property) = self.property() {
            error.push_str(&format!(" with property '{}'", property));
        }
        if let Some(text) = self.text() {
            error.push_str(&format!(" containing text '{}'", text));
        }
        error.push('.');
        error
    }
}

/// 递归搜索任意 JSON 值中的字符串叶子，`needle` 须已转为小写
pub fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| contains_text(item, needle)),
        Value::Object(map) => map.values().any(|item| contains_text(item, needle)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

impl SchemaMatcher for ComponentUpdateSchemaMatcher {
    fn validate(&self, payload: &Value) -> ValidationResult {
        let Some(components) = payload
            .get("surfaceUpdate")
            .and_then(|su| su.get("components"))
            .and_then(Value::as_array)
        else {
            return ValidationResult::fail(format!(
                "SurfaceUpdate message must have a \"components\" array.\n{}",
                payload
            ));
        };

        if components.iter().any(|c| self.matches(c)) {
            ValidationResult::ok()
        } else {
            ValidationResult::fail(self.failure_message())
        }
    }

    fn description(&self) -> String {
        let mut description = format!("Expected component '{}'", self.component_name);
        if let Some(property) = self.property() {
            description.push_str(&format!(" with property '{}'", property));
        }
        if let Some(text) = self.text() {
            description.push_str(&format!(" containing text '{}'", text));
        }
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fruit_list() -> Value {
        json!({
            "surfaceUpdate": {
                "surfaceId": "main",
                "components": [
                    { "id": "title", "componentProperties": {
                        "Text": { "text": { "literalString": "Top 5 FRUITS" } }
                    } },
                    { "id": "img", "componentProperties": {
                        "Image": { "url": { "path": "/items/0/image" } }
                    } },
                ]
            }
        })
    }

    #[test]
    fn test_case_insensitive_text_match() {
        let payload = fruit_list();
        let found = ComponentUpdateSchemaMatcher::new("Text", Some("text"), Some("fruit"));
        assert!(found.validate(&payload).success);

        let missing = ComponentUpdateSchemaMatcher::new("Text", Some("text"), Some("vegetable"));
        assert_eq!(
            missing.validate(&payload),
            ValidationResult::fail(
                "Failed to find component 'Text' with property 'text' containing text 'vegetable'."
            )
        );
    }

    #[test]
    fn test_component_only() {
        let payload = fruit_list();
        assert!(ComponentUpdateSchemaMatcher::new("Image", None, None)
            .validate(&payload)
            .success);
        assert_eq!(
            ComponentUpdateSchemaMatcher::new("Video", None, None).validate(&payload),
            ValidationResult::fail("Failed to find component 'Video'.")
        );
    }

    #[test]
    fn test_missing_property() {
        let payload = fruit_list();
        assert_eq!(
            ComponentUpdateSchemaMatcher::new("Image", Some("altText"), None).validate(&payload),
            ValidationResult::fail("Failed to find component 'Image' with property 'altText'.")
        );
    }

    #[test]
    fn test_components_array_required() {
        let payload = json!({ "beginRendering": { "root": "r" } });
        let result = ComponentUpdateSchemaMatcher::new("Text", None, None).validate(&payload);
        assert_eq!(
            result.error.as_deref(),
            Some("SurfaceUpdate message must have a \"components\" array.\n{\"beginRendering\":{\"root\":\"r\"}}")
        );
    }

    #[test]
    fn test_contains_text_nested() {
        let value = json!({ "a": [1, null, { "b": ["deep", { "c": "Needle here" }] }] });
        assert!(contains_text(&value, "needle"));
        assert!(!contains_text(&value, "haystack"));
        assert!(!contains_text(&json!(42), "42"));
    }

    #[test]
    fn test_description() {
        assert_eq!(
            ComponentUpdateSchemaMatcher::new("Text", Some("text"), Some("fruit")).description(),
            "Expected component 'Text' with property 'text' containing text 'fruit'"
        );
    }
}
