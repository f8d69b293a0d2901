//! Fixture 加载错误
//!
//! 验证失败永远以错误字符串列表返回，这里只描述读取和解析 fixture 文件时的宿主错误。

use std::path::PathBuf;

use thiserror::Error;

pub type FixtureResult<T> = Result<T, FixtureError>;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("duplicate prompt name: {0}")]
    DuplicatePrompt(String),
    #[error("unsupported fixture format: {0} (expected .yaml, .yml or .json)")]
    UnknownFormat(PathBuf),
}
