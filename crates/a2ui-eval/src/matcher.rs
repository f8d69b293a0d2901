//! 可插拔匹配器
//!
//! 匹配器在结构验证之外对一条消息做语义断言。变体集合是封闭的，
//! 由 [`Matcher`] 枚举统一分派；每个具体匹配器也单独实现 [`SchemaMatcher`]，
//! 方便直接使用。
//!
//! 匹配器配置可以从 fixture 文件反序列化：
//!
//! ```rust
//! use a2ui_eval::matcher::{Matcher, SchemaMatcher};
//!
//! let matcher: Matcher = serde_json::from_value(serde_json::json!({
//!     "type": "messageType",
//!     "messageType": "beginRendering"
//! }))
//! .unwrap();
//! assert_eq!(
//!     matcher.description(),
//!     "Expected top-level message type to be 'beginRendering'"
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matchers::{BasicSchemaMatcher, ComponentUpdateSchemaMatcher, MessageTypeMatcher};

/// 单个匹配器的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// 匹配器接口
pub trait SchemaMatcher {
    /// 对消息负载做断言
    fn validate(&self, payload: &Value) -> ValidationResult;

    /// 断言的简短描述，用于报告
    fn description(&self) -> String;
}

/// 所有匹配器变体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Matcher {
    /// 顶层属性存在/相等
    Basic(BasicSchemaMatcher),
    /// 组件、属性与文本搜索
    ComponentUpdate(ComponentUpdateSchemaMatcher),
    /// 顶层消息类型
    MessageType(MessageTypeMatcher),
}

impl Matcher {
    pub fn basic(property_name: impl Into<String>, property_value: Option<Value>) -> Self {
        Matcher::Basic(BasicSchemaMatcher::new(property_name, property_value))
    }

    pub fn component_update(
        component_name: impl Into<String>,
        property_name: Option<&str>,
        match_text: Option<&str>,
    ) -> Self {
        Matcher::ComponentUpdate(ComponentUpdateSchemaMatcher::new(
            component_name,
            property_name,
            match_text,
        ))
    }

    pub fn message_type(message_type: impl Into<String>) -> Self {
        Matcher::MessageType(MessageTypeMatcher::new(message_type))
    }

    fn inner(&self) -> &dyn SchemaMatcher {
        match self {
            Matcher::Basic(m) => m,
            Matcher::ComponentUpdate(m) => m,
            Matcher::MessageType(m) => m,
        }
    }
}

impl SchemaMatcher for Matcher {
    fn validate(&self, payload: &Value) -> ValidationResult {
        let result = self.inner().validate(payload);
        tracing::trace!(
            matcher = %self.description(),
            success = result.success,
            "matcher evaluated"
        );
        result
    }

    fn description(&self) -> String {
        self.inner().description()
    }
}
