// crates/core/src/error.rs

//! Error taxonomy for tool management operations.

use std::fmt;

use thiserror::Error;

/// Maximum number of characters of a remote response body kept in errors.
pub const BODY_PREVIEW_CHARS: usize = 300;

/// The round trip an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateTool,
    UpdateTool,
    ReadAgent,
    WriteAgentTools,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::CreateTool => "create tool",
            Step::UpdateTool => "update tool",
            Step::ReadAgent => "read agent",
            Step::WriteAgentTools => "write agent tools",
        })
    }
}

#[derive(Error, Debug)]
pub enum ForgeError {
    /// A required environment value is absent or empty.
    #[error("{var} not found in environment")]
    MissingCredential { var: &'static str },

    /// A required argument for the chosen action is missing or empty.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Unknown action: {0}. Use create, update, attach, detach, or list.")]
    UnknownAction(String),

    /// Non-success status from the remote service.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// A single round trip exceeded the configured timeout.
    #[error("timed out waiting for {url}")]
    Timeout { url: String },

    #[error("transport error: {0}")]
    Transport(String),

    /// Body could not be decoded, or a field the operation needs is absent.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<ForgeError>,
    },

    /// The tool exists on the remote service but was not added to the agent.
    #[error("Created {name} ({id}) but not attached: {source}")]
    CreatedNotAttached {
        name: String,
        id: String,
        #[source]
        source: Box<ForgeError>,
    },
}

impl ForgeError {
    /// Build a remote error, keeping only a preview of the body.
    pub fn remote(status: u16, body: &str) -> Self {
        ForgeError::Remote {
            status,
            body: truncate_chars(body.trim(), BODY_PREVIEW_CHARS),
        }
    }

    /// Tag this error with the round trip it happened in.
    pub fn during(self, step: Step) -> Self {
        ForgeError::Step {
            step,
            source: Box::new(self),
        }
    }

    /// Render as the text handed back to the calling agent.
    pub fn to_message(&self) -> String {
        match self {
            ForgeError::UnknownAction(_) | ForgeError::CreatedNotAttached { .. } => self.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Result type alias for tool management operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Truncate on a character boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
