//! A2UI 结构验证
//!
//! 按消息种类分派，递归检查组件树：ID 唯一性、引用完整性、
//! 各组件类型的必填属性以及 `explicitList`/`template` 互斥规则。
//!
//! 错误会累积而不是在第一处失败时返回；只有在无法继续推断结构时
//! （缺少 `components` 数组、`componentProperties` 缺失或不唯一）才放弃当前分支。

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog::{ComponentType, ReferenceRule};
use crate::protocol::{detect, is_truthy, truthy_field, Detected, MessageKind};

/// 对一条 A2UI 消息做结构验证，返回空列表表示结构合法
pub fn validate_structure(payload: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    match detect(payload) {
        Detected::Single(kind, body) => {
            tracing::debug!(kind = %kind, "validating A2UI message");
            match kind {
                MessageKind::SurfaceUpdate => validate_surface_update(body, &mut errors),
                MessageKind::DataModelUpdate => validate_data_model_update(body, &mut errors),
                MessageKind::BeginRendering => validate_begin_rendering(body, &mut errors),
                MessageKind::SurfaceDeletion => validate_surface_deletion(body, &mut errors),
            }
        }
        Detected::Ambiguous(kinds) => {
            let found: Vec<&str> = kinds.iter().map(|k| k.key()).collect();
            errors.push(format!(
                "A2UI Protocol message must have exactly one of: {}, but found: {}.",
                variant_list(),
                found.join(", ")
            ));
        }
        Detected::Missing => {
            errors.push(format!(
                "A2UI Protocol message must have one of: {}.",
                variant_list()
            ));
        }
    }

    tracing::debug!(errors = errors.len(), "structural validation finished");
    errors
}

fn variant_list() -> String {
    MessageKind::ALL
        .iter()
        .map(|k| k.key())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// 非组件消息
// ============================================================================

fn validate_surface_deletion(body: &Value, errors: &mut Vec<String>) {
    if body.get("delete") != Some(&Value::Bool(true)) {
        errors.push(r#"SurfaceDeletion must have a "delete" property set to true."#.to_string());
    }
    check_allowed_keys(body, MessageKind::SurfaceDeletion, &["delete"], errors);
}

fn validate_data_model_update(body: &Value, errors: &mut Vec<String>) {
    // 显式的 null 也算提供了 contents
    if body.get("contents").is_none() {
        errors.push("DataModelUpdate must have a 'contents' property.".to_string());
    }
    check_allowed_keys(body, MessageKind::DataModelUpdate, &["path", "contents"], errors);
}

fn validate_begin_rendering(body: &Value, errors: &mut Vec<String>) {
    if truthy_field(body, "root").is_none() {
        errors.push("BeginRendering message must have a 'root' property.".to_string());
    }
}

fn check_allowed_keys(body: &Value, kind: MessageKind, allowed: &[&str], errors: &mut Vec<String>) {
    let Some(obj) = body.as_object() else {
        return;
    };
    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(format!(
                "{} has unexpected property: {}",
                kind.type_name(),
                key
            ));
        }
    }
}

// ============================================================================
// SurfaceUpdate
// ============================================================================

fn validate_surface_update(body: &Value, errors: &mut Vec<String>) {
    let Some(components) = truthy_field(body, "components").and_then(Value::as_array) else {
        errors.push("ComponentUpdate must have a 'components' array.".to_string());
        return;
    };

    tracing::debug!(components = components.len(), "validating surface update");

    // 第一遍：收集全部 ID，之后的引用检查因此允许前向引用
    let mut all_ids: HashSet<&str> = HashSet::with_capacity(components.len());
    for component in components {
        if let Some(id) = component_id(component) {
            if !all_ids.insert(id) {
                errors.push(format!("Duplicate component ID found: {}", id));
            }
        }
    }

    // 第二遍：逐个验证组件
    for component in components {
        validate_component(component, &all_ids, errors);
    }
}

fn component_id(component: &Value) -> Option<&str> {
    component
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

fn validate_component(component: &Value, all_ids: &HashSet<&str>, errors: &mut Vec<String>) {
    let Some(id) = component_id(component) else {
        errors.push("Component is missing an 'id'.".to_string());
        return;
    };

    let Some(component_properties) = truthy_field(component, "componentProperties") else {
        errors.push(format!(
            "Component '{}' is missing 'componentProperties'.",
            id
        ));
        return;
    };

    let entries: Vec<(&String, &Value)> = component_properties
        .as_object()
        .map(|obj| obj.iter().collect())
        .unwrap_or_default();
    let [(type_name, properties)] = entries[..] else {
        errors.push(format!(
            "Component '{}' must have exactly one property in 'componentProperties', but found {}.",
            id,
            entries.len()
        ));
        return;
    };

    let Ok(component_type) = type_name.parse::<ComponentType>() else {
        errors.push(format!(
            "Unknown component type '{}' in component '{}'.",
            type_name, id
        ));
        return;
    };

    let checker = ComponentChecker {
        id,
        component_type,
        properties,
        all_ids,
    };
    checker.check(errors);
}

/// 单个组件的类型规则检查
struct ComponentChecker<'a> {
    id: &'a str,
    component_type: ComponentType,
    properties: &'a Value,
    all_ids: &'a HashSet<&'a str>,
}

impl ComponentChecker<'_> {
    fn check(&self, errors: &mut Vec<String>) {
        self.check_required(errors);

        match self.component_type.reference_rule() {
            ReferenceRule::None => {}
            ReferenceRule::Children => self.check_children(errors),
            ReferenceRule::Fields(fields) => {
                for field in fields {
                    if let Some(target) = self.properties.get(*field) {
                        self.check_ref(target, errors);
                    }
                }
            }
            ReferenceRule::TabItems => self.check_tab_items(errors),
        }
    }

    fn check_required(&self, errors: &mut Vec<String>) {
        for prop in self.component_type.required_properties() {
            if self.properties.get(*prop).is_none() {
                errors.push(format!(
                    "Component '{}' of type '{}' is missing required property '{}'.",
                    self.id, self.component_type, prop
                ));
            }
        }
    }

    fn check_children(&self, errors: &mut Vec<String>) {
        let Some(children) = truthy_field(self.properties, "children") else {
            return;
        };

        let explicit = truthy_field(children, "explicitList");
        let template = truthy_field(children, "template");
        if explicit.is_some() == template.is_some() {
            errors.push(format!(
                "Component '{}' must have either 'explicitList' or 'template' in children, but not both or neither.",
                self.id
            ));
        }

        match explicit {
            Some(Value::Array(list)) => {
                for child in list {
                    self.check_ref(child, errors);
                }
            }
            Some(other) => self.check_ref(other, errors),
            None => {}
        }

        if let Some(component_id) = template.and_then(|t| t.get("componentId")) {
            self.check_ref(component_id, errors);
        }
    }

    fn check_tab_items(&self, errors: &mut Vec<String>) {
        let Some(items) = self.properties.get("tabItems").and_then(Value::as_array) else {
            return;
        };

        for tab in items {
            if truthy_field(tab, "title").is_none() {
                errors.push(format!(
                    "Tab item in component '{}' is missing a 'title'.",
                    self.id
                ));
            }
            match tab.get("child") {
                Some(child) if is_truthy(child) => self.check_ref(child, errors),
                _ => errors.push(format!(
                    "Tab item in component '{}' is missing a 'child'.",
                    self.id
                )),
            }
        }
    }

    /// 检查一个引用是否指向同一 SurfaceUpdate 中声明过的 ID，假值引用忽略
    fn check_ref(&self, target: &Value, errors: &mut Vec<String>) {
        if !is_truthy(target) {
            return;
        }
        let exists = target
            .as_str()
            .is_some_and(|id| self.all_ids.contains(id));
        if !exists {
            let shown = match target {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            errors.push(format!(
                "Component '{}' references non-existent component ID '{}'.",
                self.id, shown
            ));
        }
    }
}
