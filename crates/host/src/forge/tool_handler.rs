// crates/host/src/forge/tool_handler.rs

//! Tool handler for forge_tool calls.

use anyhow::{Context, Result};
use serde::Deserialize;

use forge_core::config::Credentials;
use forge_core::{
    execute, respond, ForgeConfig, ForgeError, ForgeRequest, ForgeResult, RemoteToolClient,
    ToolService,
};

use super::tool_defs::FORGE_TOOL_NAME;
use crate::log;

/// A function call as emitted by the model.
#[derive(Debug, Deserialize, Clone)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    pub function: ToolFunction,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToolFunction {
    pub name: String,
    /// Raw JSON string of the arguments.
    pub arguments: String,
}

impl ToolCall {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse tool call")
    }
}

/// Decodes forge_tool calls and runs them against the remote tool service.
#[derive(Default)]
pub struct ForgeToolHandler;

impl ForgeToolHandler {
    pub fn new() -> Self {
        Self
    }

    /// Handle a tool call. Problems with the call itself come back as text so
    /// the agent can correct them.
    pub fn handle(&self, tc: &ToolCall) -> Result<String> {
        let config = ForgeConfig::from_env();
        Ok(self.handle_with(tc, &config, |credentials| {
            RemoteToolClient::new(&config, credentials)
        }))
    }

    /// Handle a tool call against the service `connect` builds.
    pub fn handle_with<S, F>(&self, tc: &ToolCall, config: &ForgeConfig, connect: F) -> String
    where
        S: ToolService,
        F: FnOnce(&Credentials) -> ForgeResult<S>,
    {
        tracing::debug!("handling tool call {}", tc.id);
        log::tool_call(&tc.function.name, &tc.function.arguments);

        let result = run(tc, config, connect);
        let is_error = result.is_err();
        let text = respond(result);

        log::tool_result(&tc.function.name, &text, is_error);
        text
    }
}

fn run<S, F>(tc: &ToolCall, config: &ForgeConfig, connect: F) -> ForgeResult<String>
where
    S: ToolService,
    F: FnOnce(&Credentials) -> ForgeResult<S>,
{
    let request = decode(tc)?;
    execute(config, &request, connect)
}

/// Turn a tool call into a request.
pub fn decode(tc: &ToolCall) -> ForgeResult<ForgeRequest> {
    if tc.function.name != FORGE_TOOL_NAME {
        return Err(ForgeError::InvalidRequest(format!(
            "Unknown tool '{}'",
            tc.function.name
        )));
    }
    serde_json::from_str(&tc.function.arguments).map_err(|e| {
        ForgeError::InvalidRequest(format!(
            "Invalid forge_tool args: {}. Required: {{\"action\": \"list\"}}",
            e
        ))
    })
}
