//! # a2ui-eval
//!
//! A2UI (Agent-to-User Interface) 消息验证与评测匹配器
//!
//! 提供：
//! - 四种服务端消息的结构验证（组件 ID 唯一性、引用完整性、必填属性）
//! - 可插拔的语义匹配器（属性相等、组件文本搜索、顶层消息类型）
//! - 测试 prompt fixture 的加载
//!
//! ## 快速开始
//!
//! ```rust
//! use a2ui_eval::prelude::*;
//! use serde_json::json;
//!
//! let payload = json!({ "beginRendering": { "root": "root-column" } });
//! let errors = validate_schema(&payload, &[Matcher::message_type("beginRendering")]);
//! assert!(errors.is_empty());
//! ```

pub mod catalog;
pub mod error;
pub mod fixture;
pub mod matcher;
pub mod matchers;
pub mod protocol;
pub mod validation;

use serde_json::Value;

use crate::matcher::SchemaMatcher;

pub use crate::matcher::Matcher;
pub use crate::validation::validate_structure;

/// 验证一条消息：先做结构验证，再按顺序运行每个匹配器
///
/// 返回全部错误字符串，结构错误在前、匹配器错误按传入顺序在后。
/// 空列表表示通过。
pub fn validate_schema(payload: &Value, matchers: &[Matcher]) -> Vec<String> {
    let mut errors = validate_structure(payload);
    let structural = errors.len();

    for matcher in matchers {
        let result = matcher.validate(payload);
        if !result.success {
            errors.push(
                result
                    .error
                    .unwrap_or_else(|| format!("Matcher failed: {}", matcher.description())),
            );
        }
    }

    tracing::debug!(
        structural,
        matcher_errors = errors.len() - structural,
        matchers = matchers.len(),
        "validation finished"
    );
    errors
}

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::catalog::{ComponentType, ReferenceRule};
    pub use crate::error::{FixtureError, FixtureResult};
    pub use crate::fixture::{PromptSet, TestPrompt};
    pub use crate::matcher::{Matcher, SchemaMatcher, ValidationResult};
    pub use crate::matchers::*;
    pub use crate::protocol::MessageKind;
    pub use crate::{validate_schema, validate_structure};
}
