use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

use forge_core::config::{AGENT_ID_VAR, API_KEY_VAR, BASE_URL_VAR, TIMEOUT_VAR};
use forge_core::types::{Action, ToolUpdate};
use forge_core::{execute, respond, ForgeConfig, ForgeError, ForgeRequest, RemoteToolClient, ToolService};

fn config_for(server: &MockServer, timeout_secs: Option<&str>) -> ForgeConfig {
    let base = server.url("/v1");
    let timeout = timeout_secs.map(str::to_string);
    ForgeConfig::from_lookup(move |name| match name {
        API_KEY_VAR => Some("sk-test".to_string()),
        AGENT_ID_VAR => Some("agent-1".to_string()),
        BASE_URL_VAR => Some(base.clone()),
        TIMEOUT_VAR => timeout.clone(),
        _ => None,
    })
}

fn client_for(server: &MockServer) -> RemoteToolClient {
    let config = config_for(server, None);
    let credentials = config.credentials(Action::List).unwrap();
    RemoteToolClient::new(&config, &credentials).unwrap()
}

#[test]
fn create_posts_source_with_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/tools/")
            .header("authorization", "Bearer sk-test")
            .json_body(json!({ "source_code": "def roll_dice(): ..." }));
        then.status(200)
            .json_body(json!({ "id": "tool-9", "name": "roll_dice", "tags": [] }));
    });

    let tool = client_for(&server).create_tool("def roll_dice(): ...").unwrap();

    mock.assert();
    assert_eq!(tool.id, "tool-9");
    assert_eq!(tool.name, "roll_dice");
    assert_eq!(tool.description, "");
}

#[test]
fn create_without_id_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/tools/");
        then.status(200).json_body(json!({ "name": "roll_dice" }));
    });

    let err = client_for(&server).create_tool("def roll_dice(): ...").unwrap_err();
    assert!(matches!(err, ForgeError::MalformedResponse(_)), "{err:?}");
}

#[test]
fn non_success_status_carries_truncated_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/tools/");
        then.status(422).body("x".repeat(1000));
    });

    match client_for(&server).create_tool("not python").unwrap_err() {
        ForgeError::Remote { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body.len(), 300);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn update_patches_only_present_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1/tools/tool-4")
            .json_body(json!({ "description": "post-it: 42" }));
        then.status(200).json_body(json!({ "id": "tool-4" }));
    });

    let update = ToolUpdate {
        source_code: None,
        description: Some("post-it: 42".into()),
    };
    client_for(&server).update_tool("tool-4", &update).unwrap();
    mock.assert();
}

#[test]
fn empty_update_is_rejected_locally() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH).path("/v1/tools/tool-4");
        then.status(200);
    });

    let err = client_for(&server)
        .update_tool("tool-4", &ToolUpdate::default())
        .unwrap_err();
    assert!(matches!(err, ForgeError::InvalidRequest(_)));
    mock.assert_hits(0);
}

#[test]
fn read_agent_tools_keeps_order_and_tolerates_missing_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/agents/agent-1");
        then.status(200).json_body(json!({
            "id": "agent-1",
            "tools": [
                { "id": "t-2", "name": "second", "description": "later" },
                { "id": "t-1" }
            ]
        }));
    });

    let tools = client_for(&server).read_agent_tools("agent-1").unwrap();
    let ids: Vec<_> = tools.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t-2", "t-1"]);
    assert_eq!(tools[1].name, "t-1");
}

#[test]
fn agent_without_tools_reads_as_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/agents/agent-1");
        then.status(200).json_body(json!({ "id": "agent-1" }));
    });

    assert!(client_for(&server).read_agent_tools("agent-1").unwrap().is_empty());
}

#[test]
fn write_agent_tools_sends_full_ordered_list() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1/agents/agent-1")
            .header("authorization", "Bearer sk-test")
            .json_body(json!({ "tool_ids": ["t-1", "t-9"] }));
        then.status(200).json_body(json!({ "id": "agent-1" }));
    });

    client_for(&server)
        .write_agent_tools("agent-1", &["t-1".to_string(), "t-9".to_string()])
        .unwrap();
    mock.assert();
}

#[test]
fn slow_round_trip_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/agents/agent-1");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({ "tools": [] }));
    });

    let config = config_for(&server, Some("1"));
    let credentials = config.credentials(Action::List).unwrap();
    let client = RemoteToolClient::new(&config, &credentials).unwrap();

    let err = client.read_agent_tools("agent-1").unwrap_err();
    assert!(matches!(err, ForgeError::Timeout { .. }), "{err:?}");
}

#[test]
fn detach_end_to_end_over_http() {
    let server = MockServer::start();
    let read = server.mock(|when, then| {
        when.method(GET).path("/v1/agents/agent-1");
        then.status(200).json_body(json!({
            "tools": [{ "id": "a" }, { "id": "b" }, { "id": "c" }]
        }));
    });
    let write = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1/agents/agent-1")
            .json_body(json!({ "tool_ids": ["a", "c"] }));
        then.status(200);
    });

    let config = config_for(&server, None);
    let msg = respond(execute(
        &config,
        &ForgeRequest::new("detach").with_tool_id("b"),
        |credentials| RemoteToolClient::new(&config, credentials),
    ));

    read.assert();
    write.assert();
    assert!(msg.starts_with("Detached b"), "{msg}");
}

#[test]
fn attach_write_failure_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/agents/agent-1");
        then.status(200).json_body(json!({ "tools": [{ "id": "a" }] }));
    });
    server.mock(|when, then| {
        when.method(PATCH).path("/v1/agents/agent-1");
        then.status(409).body("conflict");
    });

    let config = config_for(&server, None);
    let msg = respond(execute(
        &config,
        &ForgeRequest::new("attach").with_tool_id("b"),
        |credentials| RemoteToolClient::new(&config, credentials),
    ));

    assert_eq!(msg, "Error: write agent tools failed: HTTP 409: conflict");
}

#[test]
fn slash_in_tool_id_stays_inside_the_tool_path() {
    let server = MockServer::start();
    let tool = server.mock(|when, then| {
        when.method(PATCH).path_contains("/v1/tools/");
        then.status(200);
    });
    let agent = server.mock(|when, then| {
        when.method(PATCH).path_contains("/agents/");
        then.status(200);
    });

    let update = ToolUpdate {
        source_code: None,
        description: Some("d".into()),
    };
    client_for(&server)
        .update_tool("x/../../agents/agent-2", &update)
        .unwrap();

    tool.assert_hits(1);
    agent.assert_hits(0);
}
