//! 评测运行与报告

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use a2ui_eval::fixture::{PromptSet, TestPrompt};
use a2ui_eval::validate_structure;
use serde::Serialize;
use serde_json::Value;

/// 原评测工具 `--keep` 目录中模型输出文件的后缀
const OUTPUT_SUFFIX: &str = ".output.json";

/// 一个文件在一个 prompt 下的验证结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub payload: Option<Value>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 读取并验证一个负载文件，每个选中的 prompt 产生一条结果
pub fn check_file(
    path: &Path,
    prompts: Option<&PromptSet>,
    prefix: Option<&str>,
) -> Vec<RunReport> {
    let payload = match read_payload(path) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(file = %path.display(), %error, "could not read payload");
            return vec![RunReport {
                file: path.to_path_buf(),
                prompt: None,
                errors: vec![error],
                payload: None,
            }];
        }
    };

    let selected = select_prompts(path, prompts, prefix);
    if selected.is_empty() {
        let errors = validate_structure(&payload);
        return vec![RunReport {
            file: path.to_path_buf(),
            prompt: None,
            errors,
            payload: Some(payload),
        }];
    }

    selected
        .into_iter()
        .map(|prompt| RunReport {
            file: path.to_path_buf(),
            prompt: Some(prompt.name.clone()),
            errors: prompt.evaluate(&payload),
            payload: Some(payload.clone()),
        })
        .collect()
}

fn read_payload(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse '{}' as JSON: {}", path.display(), e))
}

/// 选择应用到文件上的 prompt
///
/// `<name>.output.json` 只对应同名 prompt，指定前缀时该名字还须以前缀开头；
/// 其他文件在指定前缀时应用所有匹配前缀的 prompt。
/// 返回空列表表示只做结构验证。
pub fn select_prompts<'a>(
    path: &Path,
    prompts: Option<&'a PromptSet>,
    prefix: Option<&str>,
) -> Vec<&'a TestPrompt> {
    let Some(prompts) = prompts else {
        return Vec::new();
    };

    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(OUTPUT_SUFFIX));

    match (stem, prefix) {
        (Some(stem), _) => prompts
            .get(stem)
            .filter(|prompt| prefix.is_none_or(|prefix| prompt.name.starts_with(prefix)))
            .into_iter()
            .collect(),
        (None, Some(prefix)) => prompts.filter_prefix(prefix),
        (None, None) => Vec::new(),
    }
}

/// 文本格式报告
pub fn render_text(reports: &[RunReport], verbose: bool) -> String {
    let mut out = String::new();
    for report in reports {
        let status = if report.passed() { "PASS" } else { "FAIL" };
        let _ = write!(out, "{} {}", status, report.file.display());
        if let Some(prompt) = &report.prompt {
            let _ = write!(out, " [{}]", prompt);
        }
        out.push('\n');

        for error in &report.errors {
            let _ = writeln!(out, "- {}", error);
        }
        if verbose && !report.passed() {
            if let Some(payload) = &report.payload {
                let pretty = serde_json::to_string_pretty(payload)
                    .unwrap_or_else(|_| payload.to_string());
                let _ = writeln!(out, "Generated payload:\n{}", pretty);
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    let _ = writeln!(out, "\n{} / {} runs failed", failed, reports.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn prompt_set() -> PromptSet {
        PromptSet::from_json_str(
            r#"{ "prompts": [
                { "name": "deleteSurface", "matchers": [ { "type": "messageType", "messageType": "surfaceDeletion" } ] },
                { "name": "deleteAll", "matchers": [] },
                { "name": "render", "matchers": [ { "type": "basic", "propertyName": "beginRendering" } ] }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_prompts() {
        let set = prompt_set();
        let names = |v: Vec<&TestPrompt>| v.iter().map(|p| p.name.clone()).collect::<Vec<_>>();

        assert!(select_prompts(Path::new("render.output.json"), None, None).is_empty());
        assert_eq!(
            names(select_prompts(Path::new("out/render.output.json"), Some(&set), None)),
            vec!["render"]
        );
        assert!(select_prompts(Path::new("render.json"), Some(&set), None).is_empty());
        assert_eq!(
            names(select_prompts(Path::new("x.json"), Some(&set), Some("delete"))),
            vec!["deleteSurface", "deleteAll"]
        );
        assert_eq!(
            names(select_prompts(Path::new("deleteAll.output.json"), Some(&set), Some("delete"))),
            vec!["deleteAll"]
        );
        assert!(select_prompts(Path::new("render.output.json"), Some(&set), Some("delete")).is_empty());
        assert!(select_prompts(Path::new("other.output.json"), Some(&set), Some("delete")).is_empty());
    }

    #[test]
    fn test_check_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let reports = check_file(&path, None, None);
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].passed());
        assert!(reports[0].errors[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_check_file_with_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.output.json");
        std::fs::write(&path, json!({ "beginRendering": { "root": "r" } }).to_string()).unwrap();

        let set = prompt_set();
        let reports = check_file(&path, Some(&set), None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].prompt.as_deref(), Some("render"));
        assert!(reports[0].passed());

        let reports = check_file(&path, Some(&set), Some("delete"));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].prompt, None);
        assert!(reports[0].passed());
    }

    #[test]
    fn test_output_file_uses_only_its_own_prompt_under_prefix() {
        let set = PromptSet::from_json_str(
            r#"{ "prompts": [
                { "name": "restaurantList", "matchers": [
                    { "type": "messageType", "messageType": "surfaceUpdate" },
                    { "type": "componentUpdate", "componentName": "List", "propertyName": "children" }
                ] },
                { "name": "restaurantData", "matchers": [
                    { "type": "messageType", "messageType": "dataModelUpdate" },
                    { "type": "basic", "propertyName": "dataModelUpdate" }
                ] }
            ] }"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurantData.output.json");
        std::fs::write(
            &path,
            json!({ "dataModelUpdate": { "path": "/", "contents": [] } }).to_string(),
        )
        .unwrap();

        let reports = check_file(&path, Some(&set), Some("restaurant"));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].prompt.as_deref(), Some("restaurantData"));
        assert_eq!(reports[0].errors, Vec::<String>::new());
    }

    #[test]
    fn test_render_text() {
        let reports = vec![
            RunReport {
                file: PathBuf::from("a.json"),
                prompt: None,
                errors: vec![],
                payload: None,
            },
            RunReport {
                file: PathBuf::from("b.json"),
                prompt: Some("render".to_string()),
                errors: vec!["BeginRendering message must have a 'root' property.".to_string()],
                payload: Some(json!({ "beginRendering": {} })),
            },
        ];
        assert_eq!(
            render_text(&reports, false),
            "PASS a.json\nFAIL b.json [render]\n- BeginRendering message must have a 'root' property.\n\n1 / 2 runs failed\n"
        );
        assert!(render_text(&reports, true).contains("Generated payload:"));
    }
}
