//! 结构验证与文本搜索的属性测试
//!
//! - 相同输入总是产生相同且顺序稳定的错误列表
//! - 任意顺序排列的组件之间的前向引用都合法
//! - 重复 ID 的错误数等于重复出现的次数
//! - 文本搜索可以到达任意深度的字符串叶子

use a2ui_eval::matchers::contains_text;
use a2ui_eval::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// 任意 JSON 值（有限深度）
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{1,10}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// 任意消息：顶层键从协议键和随机键中选取
fn arb_message() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("surfaceUpdate".to_string()),
        Just("dataModelUpdate".to_string()),
        Just("beginRendering".to_string()),
        Just("surfaceDeletion".to_string()),
        "[a-z]{1,8}",
    ];
    prop::collection::btree_map(key, arb_json(), 0..3)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// 一棵合法组件树：一个根 Column 引用全部 Text 叶子，返回打乱前的组件列表
fn arb_valid_components() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::hash_set("[a-z]{1,6}", 1..12).prop_map(|ids| {
        let ids: Vec<String> = ids.into_iter().map(|id| format!("leaf-{}", id)).collect();
        let mut components = vec![json!({
            "id": "root",
            "componentProperties": { "Column": { "children": { "explicitList": ids } } }
        })];
        for id in &ids {
            components.push(json!({
                "id": id,
                "componentProperties": { "Text": { "text": { "literalString": id } } }
            }));
        }
        components
    })
}

fn surface(components: Vec<Value>) -> Value {
    json!({ "surfaceUpdate": { "components": components } })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_validation_is_deterministic(payload in arb_message()) {
        let matchers = vec![
            Matcher::message_type("surfaceUpdate"),
            Matcher::component_update("Text", Some("text"), Some("a")),
            Matcher::basic("beginRendering", Some(json!({ "root": "r" }))),
        ];
        let first = validate_schema(&payload, &matchers);
        let second = validate_schema(&payload, &matchers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_forward_references_accepted(
        components in arb_valid_components(),
        rotation in any::<usize>(),
    ) {
        let mut components = components;
        let len = components.len();
        components.rotate_left(rotation % len);
        components.reverse();
        prop_assert!(validate_structure(&surface(components)).is_empty());
    }

    #[test]
    fn prop_duplicate_count(
        components in arb_valid_components(),
        repeats in 1usize..4,
    ) {
        let mut components = components;
        let duplicate = components[0].clone();
        for _ in 0..repeats {
            components.push(duplicate.clone());
        }
        let errors = validate_structure(&surface(components));
        let duplicates = errors
            .iter()
            .filter(|e| e.as_str() == "Duplicate component ID found: root")
            .count();
        prop_assert_eq!(duplicates, repeats);
        prop_assert_eq!(errors.len(), repeats);
    }

    #[test]
    fn prop_deep_text_found(depth in 0usize..64, needle in "[a-z]{3,8}") {
        let mut value = json!(format!("prefix {} suffix", needle.to_uppercase()));
        for level in 0..depth {
            value = if level % 2 == 0 {
                json!([null, 1, value])
            } else {
                json!({ "other": false, "nested": value })
            };
        }
        prop_assert!(contains_text(&value, &needle));
    }

    #[test]
    fn prop_unknown_component_type_always_reported(
        tag in "[A-Z][a-z]{3,10}",
        props in arb_json(),
    ) {
        prop_assume!(tag.parse::<ComponentType>().is_err());
        let payload = surface(vec![json!({ "id": "x", "componentProperties": { tag.clone(): props } })]);
        let errors = validate_structure(&payload);
        prop_assert_eq!(
            errors,
            vec![format!("Unknown component type '{}' in component 'x'.", tag)]
        );
    }
}
