//! 具体匹配器实现

mod basic;
mod component_update;
mod message_type;

pub use basic::BasicSchemaMatcher;
pub use component_update::{contains_text, ComponentUpdateSchemaMatcher};
pub use message_type::MessageTypeMatcher;
