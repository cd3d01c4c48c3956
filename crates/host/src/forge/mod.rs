// crates/host/src/forge/mod.rs

//! The forge_tool surface offered to an agent:
//! - tool_defs.rs (function definition)
//! - tool_handler.rs (call decoding and execution)

pub mod tool_defs;
pub mod tool_handler;

pub use tool_defs::{forge_tool_definition, FORGE_TOOL_NAME};
pub use tool_handler::{ForgeToolHandler, ToolCall};
