// crates/core/src/tool_service.rs

use crate::error::ForgeResult;
use crate::types::{Tool, ToolId, ToolUpdate};

/// Abstract remote tool service.
///
/// Each method is a single round trip with no retries. Implementations can be
/// the HTTP client or an in-memory fake for tests.
pub trait ToolService {
    /// Create a tool from source code. The service derives its name.
    fn create_tool(&self, source_code: &str) -> ForgeResult<Tool>;

    /// Apply a partial update to an existing tool.
    fn update_tool(&self, tool_id: &str, update: &ToolUpdate) -> ForgeResult<()>;

    /// Tools currently attached to the agent, in attachment order.
    fn read_agent_tools(&self, agent_id: &str) -> ForgeResult<Vec<Tool>>;

    /// Replace the agent's whole attachment list.
    fn write_agent_tools(&self, agent_id: &str, tool_ids: &[ToolId]) -> ForgeResult<()>;
}

impl<T: ToolService + ?Sized> ToolService for &T {
    fn create_tool(&self, source_code: &str) -> ForgeResult<Tool> {
        (**self).create_tool(source_code)
    }

    fn update_tool(&self, tool_id: &str, update: &ToolUpdate) -> ForgeResult<()> {
        (**self).update_tool(tool_id, update)
    }

    fn read_agent_tools(&self, agent_id: &str) -> ForgeResult<Vec<Tool>> {
        (**self).read_agent_tools(agent_id)
    }

    fn write_agent_tools(&self, agent_id: &str, tool_ids: &[ToolId]) -> ForgeResult<()> {
        (**self).write_agent_tools(agent_id, tool_ids)
    }
}
