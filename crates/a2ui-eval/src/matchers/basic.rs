//! 顶层属性匹配器

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::matcher::{SchemaMatcher, ValidationResult};

/// 检查顶层属性是否存在，并可选地比较其值
///
/// 值比较按 JSON 结构相等进行：对象键的顺序不影响结果，数字按数值比较，
/// 因此 `1` 与 `1.0` 相等。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSchemaMatcher {
    pub property_name: String,
    /// `Some(Value::Null)` 表示期望值为 `null`，`None` 表示只检查存在性
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_value: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl BasicSchemaMatcher {
    pub fn new(property_name: impl Into<String>, property_value: Option<Value>) -> Self {
        Self {
            property_name: property_name.into(),
            property_value,
        }
    }
}

/// 结构相等，数字按 `f64` 比较
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

impl SchemaMatcher for BasicSchemaMatcher {
    fn validate(&self, payload: &Value) -> ValidationResult {
        if payload.is_null() {
            return ValidationResult::fail("Schema is undefined.");
        }

        let Some(actual) = payload.get(&self.property_name) else {
            return ValidationResult::fail(format!(
                "Failed to find property '{}'.",
                self.property_name
            ));
        };

        if let Some(expected) = &self.property_value {
            if !json_eq(actual, expected) {
                return ValidationResult::fail(format!(
                    "Property '{}' has value '{}', but expected '{}'.",
                    self.property_name, actual, expected
                ));
            }
        }

        ValidationResult::ok()
    }

    fn description(&self) -> String {
        match &self.property_value {
            Some(expected) => format!(
                "Expected property '{}' to equal '{}'",
                self.property_name, expected
            ),
            None => format!("Expected property '{}'", self.property_name),
        }
    }
}
