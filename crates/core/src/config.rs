// crates/core/src/config.rs

//! Environment-derived configuration, resolved once per invocation.

use std::time::Duration;

use crate::error::{ForgeError, ForgeResult};
use crate::types::Action;

pub const API_KEY_VAR: &str = "LETTA_API_KEY";
pub const AGENT_ID_VAR: &str = "LETTA_AGENT_ID";
pub const BASE_URL_VAR: &str = "LETTA_BASE_URL";
pub const TIMEOUT_VAR: &str = "LETTA_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.letta.com/v1";

/// Settings for talking to the remote tool service.
///
/// Environment variables:
/// - LETTA_API_KEY: bearer credential, required for every action
/// - LETTA_AGENT_ID: agent whose tools are managed, required except for update
/// - LETTA_BASE_URL (optional): default "https://api.letta.com/v1"
/// - LETTA_TIMEOUT_SECS (optional): per round trip, unset means no timeout
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    api_key: Option<String>,
    agent_id: Option<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

/// Credentials checked against the needs of a specific action.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub agent_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("agent_id", &self.agent_id)
            .finish()
    }
}

impl ForgeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = get(TIMEOUT_VAR).and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                tracing::warn!("ignoring {}={:?}: expected a positive number of seconds", TIMEOUT_VAR, raw);
                None
            }
        });

        Self {
            api_key: get(API_KEY_VAR),
            agent_id: get(AGENT_ID_VAR),
            base_url,
            timeout,
        }
    }

    /// The bearer credential, which every request needs whatever the action.
    pub fn api_key(&self) -> ForgeResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(ForgeError::MissingCredential { var: API_KEY_VAR })
    }

    /// Resolve the credentials `action` needs, without touching the network.
    pub fn credentials(&self, action: Action) -> ForgeResult<Credentials> {
        let api_key = self.api_key()?.to_string();

        if action.needs_agent() && self.agent_id.is_none() {
            return Err(ForgeError::MissingCredential { var: AGENT_ID_VAR });
        }

        Ok(Credentials {
            api_key,
            agent_id: self.agent_id.clone(),
        })
    }
}
