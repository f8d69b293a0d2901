//! A2UI 标准组件目录
//!
//! 组件类型标签与其结构规则的固定对照表：必填属性和引用其他组件的方式。

use std::fmt;
use std::str::FromStr;

// ============================================================================
// 组件类型
// ============================================================================

/// 所有标准组件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Heading,
    Text,
    Image,
    Video,
    AudioPlayer,
    TextField,
    DateTimeInput,
    MultipleChoice,
    Slider,
    CheckBox,
    Row,
    Column,
    List,
    Card,
    Tabs,
    Modal,
    Button,
    Divider,
}

/// 组件引用其他组件的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceRule {
    /// 不引用其他组件
    None,
    /// `children.explicitList` 或 `children.template.componentId`，二者恰取其一
    Children,
    /// 直接以属性值引用，例如 Card 的 `child`
    Fields(&'static [&'static str]),
    /// `tabItems[].child`，每一项还必须带 `title`
    TabItems,
}

impl ComponentType {
    /// 全部组件类型
    pub const ALL: [ComponentType; 18] = [
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Video,
        ComponentType::AudioPlayer,
        ComponentType::TextField,
        ComponentType::DateTimeInput,
        ComponentType::MultipleChoice,
        ComponentType::Slider,
        ComponentType::CheckBox,
        ComponentType::Row,
        ComponentType::Column,
        ComponentType::List,
        ComponentType::Card,
        ComponentType::Tabs,
        ComponentType::Modal,
        ComponentType::Button,
        ComponentType::Divider,
    ];

    /// 组件类型标签
    pub fn name(self) -> &'static str {
        match self {
            ComponentType::Heading => "Heading",
            ComponentType::Text => "Text",
            ComponentType::Image => "Image",
            ComponentType::Video => "Video",
            ComponentType::AudioPlayer => "AudioPlayer",
            ComponentType::TextField => "TextField",
            ComponentType::DateTimeInput => "DateTimeInput",
            ComponentType::MultipleChoice => "MultipleChoice",
            ComponentType::Slider => "Slider",
            ComponentType::CheckBox => "CheckBox",
            ComponentType::Row => "Row",
            ComponentType::Column => "Column",
            ComponentType::List => "List",
            ComponentType::Card => "Card",
            ComponentType::Tabs => "Tabs",
            ComponentType::Modal => "Modal",
            ComponentType::Button => "Button",
            ComponentType::Divider => "Divider",
        }
    }

    /// 必填属性，按报告顺序排列
    pub fn required_properties(self) -> &'static [&'static str] {
        match self {
            ComponentType::Heading | ComponentType::Text => &["text"],
            ComponentType::Image | ComponentType::Video | ComponentType::AudioPlayer => &["url"],
            ComponentType::TextField => &["label"],
            ComponentType::DateTimeInput | ComponentType::Slider => &["value"],
            ComponentType::MultipleChoice => &["selections"],
            ComponentType::CheckBox => &["value", "label"],
            ComponentType::Row | ComponentType::Column | ComponentType::List => &["children"],
            ComponentType::Card => &["child"],
            ComponentType::Tabs => &["tabItems"],
            ComponentType::Modal => &["entryPointChild", "contentChild"],
            ComponentType::Button => &["label", "action"],
            ComponentType::Divider => &[],
        }
    }

    /// 引用规则
    pub fn reference_rule(self) -> ReferenceRule {
        match self {
            ComponentType::Row | ComponentType::Column | ComponentType::List => {
                ReferenceRule::Children
            }
            ComponentType::Card => ReferenceRule::Fields(&["child"]),
            ComponentType::Modal => ReferenceRule::Fields(&["entryPointChild", "contentChild"]),
            ComponentType::Tabs => ReferenceRule::TabItems,
            _ => ReferenceRule::None,
        }
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown component type: {}", s))
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
