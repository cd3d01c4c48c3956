// crates/core/src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// Opaque tool identifier assigned by the remote service.
pub type ToolId = String;

/// A tool as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub id: ToolId,
    /// Derived by the service from the function name in the source code.
    pub name: String,
    /// Free text; agents also use it to stash small amounts of data.
    pub description: String,
}

/// Tool entry as it appears on the wire. Only `id` is required, and only by
/// the operations that need it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ToolRecord {
    /// Convert into a [`Tool`], failing only when the identifier is absent.
    pub fn into_tool(self) -> Result<Tool, ForgeError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ForgeError::MalformedResponse("tool record has no id".into()))?;
        Ok(Tool {
            name: self.name.unwrap_or_else(|| id.clone()),
            description: self.description.unwrap_or_default(),
            id,
        })
    }
}

/// Agent state as it appears on the wire. An agent without a `tools` field
/// has nothing attached.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentRecord {
    #[serde(default)]
    pub tools: Option<Vec<ToolRecord>>,
}

/// Partial update for an existing tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToolUpdate {
    pub fn is_empty(&self) -> bool {
        self.source_code.is_none() && self.description.is_none()
    }
}

/// The five operations an agent can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Attach,
    Detach,
    List,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Update,
        Action::Attach,
        Action::Detach,
        Action::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Attach => "attach",
            Action::Detach => "detach",
            Action::List => "list",
        }
    }

    /// Whether the action targets an agent's attachment list.
    pub fn needs_agent(&self) -> bool {
        !matches!(self, Action::Update)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| ForgeError::UnknownAction(wanted.to_string()))
    }
}
