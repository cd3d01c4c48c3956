// crates/host/src/lib.rs

//! Agent-facing surface for runtime tool management.

pub mod forge;
pub mod log;

pub use forge::{forge_tool_definition, ForgeToolHandler, ToolCall};
