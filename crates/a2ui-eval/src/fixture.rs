//! 测试 Prompt fixture
//!
//! 每个 prompt 记录一段发给模型的指令和一组用于检查模型输出的匹配器。
//! fixture 文件可以是 YAML 或 JSON：
//!
//! ```yaml
//! prompts:
//!   - name: fruitList
//!     description: A list of fruits
//!     promptText: Show me the top 5 fruits.
//!     matchers:
//!       - type: messageType
//!         messageType: surfaceUpdate
//!       - type: componentUpdate
//!         componentName: Text
//!         propertyName: text
//!         matchText: fruit
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};
use crate::matcher::Matcher;

/// 单个测试 prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPrompt {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt_text: String,
    #[serde(default)]
    pub matchers: Vec<Matcher>,
}

impl TestPrompt {
    /// 用本 prompt 的匹配器验证一条模型输出
    pub fn evaluate(&self, payload: &Value) -> Vec<String> {
        crate::validate_schema(payload, &self.matchers)
    }
}

/// 一组测试 prompt，保持文件中的顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptSet {
    pub prompts: Vec<TestPrompt>,
}

impl PromptSet {
    pub fn new(prompts: Vec<TestPrompt>) -> FixtureResult<Self> {
        let mut seen = HashSet::new();
        for prompt in &prompts {
            if !seen.insert(prompt.name.as_str()) {
                return Err(FixtureError::DuplicatePrompt(prompt.name.clone()));
            }
        }
        Ok(Self { prompts })
    }

    pub fn from_yaml_str(s: &str) -> FixtureResult<Self> {
        let raw: PromptSet = serde_yaml::from_str(s)?;
        Self::new(raw.prompts)
    }

    pub fn from_json_str(s: &str) -> FixtureResult<Self> {
        let raw: PromptSet = serde_json::from_str(s)?;
        Self::new(raw.prompts)
    }

    /// 按扩展名选择格式加载 fixture 文件
    pub fn load(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> FixtureResult<Self> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(FixtureError::UnknownFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = parse(&content)?;
        tracing::debug!(path = %path.display(), prompts = set.prompts.len(), "loaded prompt fixtures");
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&TestPrompt> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// 名称以 `prefix` 开头的 prompt
    pub fn filter_prefix(&self, prefix: &str) -> Vec<&TestPrompt> {
        self.prompts
            .iter()
            .filter(|p| p.name.starts_with(prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
