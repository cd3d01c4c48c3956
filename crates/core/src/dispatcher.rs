// crates/core/src/dispatcher.rs

//! Maps a requested action onto its round trips and renders the outcome.

use serde::{Deserialize, Serialize};

use crate::config::{Credentials, ForgeConfig};
use crate::error::{truncate_chars, ForgeError, ForgeResult, Step};
use crate::reconcile::{reconcile, Delta};
use crate::tool_service::ToolService;
use crate::types::{Action, Tool, ToolUpdate};

/// Characters of a tool description shown by `list`.
pub const LIST_DESCRIPTION_CHARS: usize = 100;

/// Arguments of a single tool management call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgeRequest {
    pub action: String,
    /// Informational only; the service names tools after their function.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub tool_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ForgeRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_source_code(mut self, source_code: impl Into<String>) -> Self {
        self.source_code = Some(source_code.into());
        self
    }

    pub fn with_tool_id(mut self, tool_id: impl Into<String>) -> Self {
        self.tool_id = Some(tool_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A request that has passed argument validation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Create { source_code: String },
    Update { tool_id: String, update: ToolUpdate },
    Attach { tool_id: String },
    Detach { tool_id: String },
    List,
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn missing(field: &str, action: Action) -> ForgeError {
    ForgeError::InvalidRequest(format!("{} required for {}", field, action))
}

fn required(value: &Option<String>, field: &str, action: Action) -> ForgeResult<String> {
    present(value).ok_or_else(|| missing(field, action))
}

/// Ids must also contain something other than whitespace.
fn required_id(value: &Option<String>, action: Action) -> ForgeResult<String> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| missing("tool_id", action))
}

impl Command {
    fn from_request(action: Action, req: &ForgeRequest) -> ForgeResult<Self> {
        Ok(match action {
            Action::Create => Command::Create {
                source_code: required(&req.source_code, "source_code", action)?,
            },
            Action::Update => {
                let tool_id = required_id(&req.tool_id, action)?;
                let update = ToolUpdate {
                    source_code: present(&req.source_code),
                    description: present(&req.description),
                };
                if update.is_empty() {
                    return Err(ForgeError::InvalidRequest(
                        "provide source_code or description to update".into(),
                    ));
                }
                Command::Update { tool_id, update }
            }
            Action::Attach => Command::Attach {
                tool_id: required_id(&req.tool_id, action)?,
            },
            Action::Detach => Command::Detach {
                tool_id: required_id(&req.tool_id, action)?,
            },
            Action::List => Command::List,
        })
    }
}

/// Runs validated commands against a tool service for one agent.
struct Dispatcher<S> {
    service: S,
    agent_id: Option<String>,
}

impl<S: ToolService> Dispatcher<S> {
    fn new(service: S, credentials: &Credentials) -> Self {
        Self {
            service,
            agent_id: credentials.agent_id.clone(),
        }
    }

    fn agent_id(&self) -> ForgeResult<&str> {
        self.agent_id
            .as_deref()
            .ok_or(ForgeError::MissingCredential {
                var: crate::config::AGENT_ID_VAR,
            })
    }

    fn run(&self, command: Command) -> ForgeResult<String> {
        match command {
            Command::Create { source_code } => self.create(&source_code),
            Command::Update { tool_id, update } => self.update(&tool_id, &update),
            Command::Attach { tool_id } => self.attach(&tool_id),
            Command::Detach { tool_id } => self.detach(&tool_id),
            Command::List => self.list(),
        }
    }

    /// Read the attachment list, apply one delta, write back if it changed.
    /// Returns whether a write happened.
    fn apply(&self, delta: Delta) -> ForgeResult<bool> {
        let agent_id = self.agent_id()?;
        let current: Vec<String> = self
            .service
            .read_agent_tools(agent_id)
            .map_err(|e| e.during(Step::ReadAgent))?
            .into_iter()
            .map(|t| t.id)
            .collect();

        let outcome = reconcile(current, &delta);
        if !outcome.changed {
            return Ok(false);
        }

        // Full replacement: changes made by others since the read above are overwritten.
        self.service
            .write_agent_tools(agent_id, &outcome.next)
            .map_err(|e| e.during(Step::WriteAgentTools))?;
        Ok(true)
    }

    fn create(&self, source_code: &str) -> ForgeResult<String> {
        let tool = self
            .service
            .create_tool(source_code)
            .map_err(|e| e.during(Step::CreateTool))?;
        tracing::info!("created tool {} ({})", tool.name, tool.id);

        // A fresh id cannot already be attached, so this always writes.
        match self.apply(Delta::Add(tool.id.clone())) {
            Ok(_) => Ok(format!("Created and attached: {} ({})", tool.name, tool.id)),
            Err(source) => {
                tracing::warn!("tool {} created but not attached: {}", tool.id, source);
                Err(ForgeError::CreatedNotAttached {
                    name: tool.name,
                    id: tool.id,
                    source: Box::new(source),
                })
            }
        }
    }

    fn update(&self, tool_id: &str, update: &ToolUpdate) -> ForgeResult<String> {
        self.service
            .update_tool(tool_id, update)
            .map_err(|e| e.during(Step::UpdateTool))?;
        tracing::info!("updated tool {}", tool_id);
        Ok(format!("Updated: {}", tool_id))
    }

    fn attach(&self, tool_id: &str) -> ForgeResult<String> {
        if !self.apply(Delta::Add(tool_id.to_string()))? {
            tracing::warn!("tool {} already attached, nothing written", tool_id);
            return Ok(format!("Tool {} is already attached", tool_id));
        }
        tracing::info!("attached tool {}", tool_id);
        Ok(format!("Attached {}", tool_id))
    }

    fn detach(&self, tool_id: &str) -> ForgeResult<String> {
        if !self.apply(Delta::Remove(tool_id.to_string()))? {
            tracing::warn!("tool {} not attached, nothing written", tool_id);
            return Ok(format!("Tool {} is not currently attached", tool_id));
        }
        tracing::info!("detached tool {}", tool_id);
        Ok(format!(
            "Detached {} (data still on server, use attach to get it back)",
            tool_id
        ))
    }

    fn list(&self) -> ForgeResult<String> {
        let tools = self
            .service
            .read_agent_tools(self.agent_id()?)
            .map_err(|e| e.during(Step::ReadAgent))?;
        render_tool_list(&tools)
    }
}

#[derive(Serialize)]
struct ListedTool<'a> {
    id: &'a str,
    name: &'a str,
    desc: String,
}

/// Pretty JSON array of `{id, name, desc}` with descriptions shortened.
pub fn render_tool_list(tools: &[Tool]) -> ForgeResult<String> {
    let listed: Vec<ListedTool<'_>> = tools
        .iter()
        .map(|t| ListedTool {
            id: &t.id,
            name: &t.name,
            desc: truncate_chars(&t.description, LIST_DESCRIPTION_CHARS),
        })
        .collect();
    serde_json::to_string_pretty(&listed).map_err(|e| ForgeError::MalformedResponse(e.to_string()))
}

/// Validate and run one request. `connect` builds the service once the
/// request is known to be well formed, so rejected requests cost no round trip.
pub fn execute<S, F>(config: &ForgeConfig, request: &ForgeRequest, connect: F) -> ForgeResult<String>
where
    S: ToolService,
    F: FnOnce(&Credentials) -> ForgeResult<S>,
{
    config.api_key()?;
    let action: Action = request.action.parse()?;
    let credentials = config.credentials(action)?;
    let command = Command::from_request(action, request)?;
    tracing::debug!("running {}", action);

    let service = connect(&credentials)?;
    Dispatcher::new(service, &credentials).run(command)
}
