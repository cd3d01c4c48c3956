// crates/host/src/forge/tool_defs.rs

//! Tool definition exposed to the agent.

use serde_json::json;

pub const FORGE_TOOL_NAME: &str = "forge_tool";

/// The forge_tool function definition.
pub fn forge_tool_definition() -> serde_json::Value {
    json!({
        "type": "function",
        "function": {
            "name": FORGE_TOOL_NAME,
            "description": "Create, update, attach, detach, or list your own tools at runtime. Uses your credentials and agent ID automatically. Create makes a new tool and attaches it to you. Update changes an existing tool's description or code. Detach removes a tool from your context (its data stays on the server). Attach reattaches a previously detached tool. List shows your current tools.",
            "parameters": {
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["create", "update", "attach", "detach", "list"],
                        "description": "The operation to perform."
                    },
                    "name": {
                        "type": "string",
                        "description": "Informational only. The tool name comes from the function name in source_code."
                    },
                    "source_code": {
                        "type": "string",
                        "description": "Source of a single function with a docstring. All imports must be inside the function body. Used with create and update."
                    },
                    "tool_id": {
                        "type": "string",
                        "description": "ID of an existing tool. Used with update, attach and detach."
                    },
                    "description": {
                        "type": "string",
                        "description": "Tool description text. Can hold small notes you want to keep. Used with update."
                    }
                },
                "required": ["action"]
            }
        }
    })
}
