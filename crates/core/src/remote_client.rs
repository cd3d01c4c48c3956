// crates/core/src/remote_client.rs

//! HTTP client for the remote tool service.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Credentials, ForgeConfig};
use crate::error::{ForgeError, ForgeResult};
use crate::tool_service::ToolService;
use crate::types::{AgentRecord, Tool, ToolId, ToolRecord, ToolUpdate};

/// Blocking client for the tool and agent endpoints. Ids are percent-encoded
/// so each one addresses a single path segment.
///
/// Endpoints:
/// - POST  {base}/tools/            create
/// - PATCH {base}/tools/{tool_id}   update
/// - GET   {base}/agents/{agent_id} read attached tools
/// - PATCH {base}/agents/{agent_id} replace attached tools
pub struct RemoteToolClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct CreateToolRequest<'a> {
    source_code: &'a str,
}

#[derive(Serialize)]
struct WriteAgentToolsRequest<'a> {
    tool_ids: &'a [ToolId],
}

impl RemoteToolClient {
    pub fn new(config: &ForgeConfig, credentials: &Credentials) -> ForgeResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ForgeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and fail on anything but a success status.
    fn send(&self, request: RequestBuilder, url: &str) -> ForgeResult<Response> {
        let resp = request
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| transport_error(e, url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            tracing::warn!("{} returned HTTP {}", url, status);
            return Err(ForgeError::remote(status.as_u16(), &body));
        }

        Ok(resp)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> ForgeResult<T> {
        let raw = self
            .send(request, url)?
            .text()
            .map_err(|e| transport_error(e, url))?;
        serde_json::from_str(&raw).map_err(|e| ForgeError::MalformedResponse(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error, url: &str) -> ForgeError {
    if err.is_timeout() {
        ForgeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ForgeError::Transport(err.to_string())
    }
}

impl ToolService for RemoteToolClient {
    fn create_tool(&self, source_code: &str) -> ForgeResult<Tool> {
        let url = self.url("/tools/");
        tracing::debug!("POST {}", url);
        let record: ToolRecord = self.send_json(
            self.client
                .post(&url)
                .json(&CreateToolRequest { source_code }),
            &url,
        )?;
        record.into_tool()
    }

    fn update_tool(&self, tool_id: &str, update: &ToolUpdate) -> ForgeResult<()> {
        if update.is_empty() {
            return Err(ForgeError::InvalidRequest(
                "provide source_code or description to update".into(),
            ));
        }
        let url = self.url(&format!("/tools/{}", urlencoding::encode(tool_id)));
        tracing::debug!("PATCH {}", url);
        self.send(self.client.patch(&url).json(update), &url)?;
        Ok(())
    }

    fn read_agent_tools(&self, agent_id: &str) -> ForgeResult<Vec<Tool>> {
        let url = self.url(&format!("/agents/{}", urlencoding::encode(agent_id)));
        tracing::debug!("GET {}", url);
        let agent: AgentRecord = self.send_json(self.client.get(&url), &url)?;
        agent
            .tools
            .unwrap_or_default()
            .into_iter()
            .map(ToolRecord::into_tool)
            .collect()
    }

    fn write_agent_tools(&self, agent_id: &str, tool_ids: &[ToolId]) -> ForgeResult<()> {
        let url = self.url(&format!("/agents/{}", urlencoding::encode(agent_id)));
        tracing::debug!("PATCH {} ({} tools)", url, tool_ids.len());
        self.send(
            self.client
                .patch(&url)
                .json(&WriteAgentToolsRequest { tool_ids }),
            &url,
        )?;
        Ok(())
    }
}
