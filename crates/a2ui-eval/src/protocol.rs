//! A2UI 协议消息类型
//!
//! 服务端到客户端的消息是一个四选一的标签联合：
//! `surfaceUpdate`、`dataModelUpdate`、`beginRendering`、`surfaceDeletion`。
//! 这里只负责识别消息种类，结构规则见 [`crate::validation`]。

use std::fmt;

use serde_json::Value;

// ============================================================================
// 消息种类
// ============================================================================

/// 顶层消息种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// 更新 Surface 组件树
    SurfaceUpdate,
    /// 更新数据模型
    DataModelUpdate,
    /// 开始渲染
    BeginRendering,
    /// 删除 Surface
    SurfaceDeletion,
}

impl MessageKind {
    /// 所有消息种类，按识别优先级排列
    pub const ALL: [MessageKind; 4] = [
        MessageKind::SurfaceUpdate,
        MessageKind::DataModelUpdate,
        MessageKind::BeginRendering,
        MessageKind::SurfaceDeletion,
    ];

    /// 消息在 JSON 中的顶层键
    pub fn key(self) -> &'static str {
        match self {
            MessageKind::SurfaceUpdate => "surfaceUpdate",
            MessageKind::DataModelUpdate => "dataModelUpdate",
            MessageKind::BeginRendering => "beginRendering",
            MessageKind::SurfaceDeletion => "surfaceDeletion",
        }
    }

    /// 错误消息中使用的类型名
    pub fn type_name(self) -> &'static str {
        match self {
            MessageKind::SurfaceUpdate => "SurfaceUpdate",
            MessageKind::DataModelUpdate => "DataModelUpdate",
            MessageKind::BeginRendering => "BeginRendering",
            MessageKind::SurfaceDeletion => "SurfaceDeletion",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// 消息识别
// ============================================================================

/// 消息识别结果
#[derive(Debug, Clone, PartialEq)]
pub enum Detected<'a> {
    /// 恰好一个变体被填充
    Single(MessageKind, &'a Value),
    /// 多个变体同时被填充
    Ambiguous(Vec<MessageKind>),
    /// 没有任何已知变体
    Missing,
}

/// 识别负载中被填充的消息变体
///
/// 只有值为真值（见 [`is_truthy`]）的变体键才算被填充，
/// 因此 `{"surfaceUpdate": null}` 等同于缺失。
pub fn detect(payload: &Value) -> Detected<'_> {
    let Some(obj) = payload.as_object() else {
        return Detected::Missing;
    };

    let populated: Vec<(MessageKind, &Value)> = MessageKind::ALL
        .into_iter()
        .filter_map(|kind| {
            obj.get(kind.key())
                .filter(|v| is_truthy(v))
                .map(|v| (kind, v))
        })
        .collect();

    match populated.as_slice() {
        [] => Detected::Missing,
        [(kind, body)] => Detected::Single(*kind, body),
        many => Detected::Ambiguous(many.iter().map(|(kind, _)| *kind).collect()),
    }
}

/// JSON 真值判断
///
/// `null`、`false`、`0` 和空字符串为假，其余（包括空数组和空对象）为真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 取出对象中的真值字段
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}
