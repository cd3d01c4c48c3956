// crates/core/src/lib.rs

//! Runtime tool management for an agent: create, update, attach, detach and
//! list tools held by a remote tool service.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod reconcile;
pub mod remote_client;
pub mod tool_service;
pub mod types;

pub use config::ForgeConfig;
pub use dispatcher::{execute, ForgeRequest};
pub use error::{ForgeError, ForgeResult};
pub use remote_client::RemoteToolClient;
pub use tool_service::ToolService;

/// Run one tool management request using credentials from the environment.
///
/// Always returns text for the calling agent; failures are described rather
/// than returned as errors.
pub fn forge_tool(request: &ForgeRequest) -> String {
    let config = ForgeConfig::from_env();
    respond(execute(&config, request, |credentials| {
        RemoteToolClient::new(&config, credentials)
    }))
}

/// Flatten an operation result into the text handed back to the agent.
pub fn respond(result: ForgeResult<String>) -> String {
    match result {
        Ok(message) => message,
        Err(err) => err.to_message(),
    }
}
