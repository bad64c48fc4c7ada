// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! End-to-end integration tests for the jenq MCP server.
//!
//! Each test drives a real [`JenqMcpServer`] over in-memory pipes, sending
//! raw JSON-RPC 2.0 messages and validating the responses.  This exercises
//! the full rmcp dispatch path against an in-memory Jenkins, and confirms
//! the wire format that real MCP hosts will see.

use std::sync::Arc;

use jenq_client::mock::{MockJenkins, StaticFactory};
use jenq_client::ClientFactory;
use jenq_mcp::{build_mcp_registry, JenqMcpServer, PromptRegistry};
use jenq_tools::ToolRegistry;
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, WriteHalf};

// ── In-process MCP server harness ────────────────────────────────────────────

fn mock_factory(mock: MockJenkins) -> Arc<dyn ClientFactory> {
    Arc::new(StaticFactory(Arc::new(mock)))
}

/// Starts a [`JenqMcpServer`] in a background task connected to in-memory
/// pipes.  Returns a writer (to send JSON-RPC to the server) and a buffered
/// reader (to read JSON-RPC responses from the server).
async fn start_test_server(
    registry: Arc<ToolRegistry>,
) -> (
    WriteHalf<DuplexStream>,
    BufReader<tokio::io::ReadHalf<DuplexStream>>,
) {
    let (client_stream, server_stream) = tokio::io::duplex(65536);

    tokio::spawn(async move {
        let server = JenqMcpServer::new(registry, Arc::new(PromptRegistry::standard()));
        if let Ok(running) = server.serve(server_stream).await {
            let _ = running.waiting().await;
        }
    });

    let (client_read, client_write) = tokio::io::split(client_stream);
    let reader = BufReader::new(client_read);
    (client_write, reader)
}

/// Write a JSON-RPC message as a single newline-terminated line.
async fn send_msg(writer: &mut WriteHalf<DuplexStream>, msg: &Value) {
    let line = serde_json::to_string(msg).expect("message must serialize");
    writer
        .write_all(line.as_bytes())
        .await
        .expect("write failed");
    writer.write_all(b"\n").await.expect("newline write failed");
    writer.flush().await.expect("flush failed");
}

/// Read one JSON-RPC response line from the server.  Times out after 5 s.
async fn recv_msg(reader: &mut BufReader<tokio::io::ReadHalf<DuplexStream>>) -> Value {
    let mut line = String::new();
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        reader.read_line(&mut line),
    )
    .await
    .expect("timed out waiting for server response")
    .expect("read error");
    serde_json::from_str(line.trim()).expect("server response must be valid JSON")
}

/// Send the MCP `initialize` handshake and drain the matching response plus
/// the `notifications/initialized` notification.  Returns the `initialize`
/// result object.
async fn initialize(
    writer: &mut WriteHalf<DuplexStream>,
    reader: &mut BufReader<tokio::io::ReadHalf<DuplexStream>>,
) -> Value {
    send_msg(
        writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "jenq-test-client", "version": "0.0.0" }
            }
        }),
    )
    .await;

    let init_resp = recv_msg(reader).await;
    assert_eq!(init_resp["jsonrpc"], "2.0");
    assert!(
        init_resp["result"].is_object(),
        "initialize must return a result object"
    );

    send_msg(
        writer,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;

    init_resp["result"].clone()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The MCP `initialize` handshake completes and declares tool and prompt
/// support.
#[tokio::test]
async fn initialize_declares_tools_and_prompts_capabilities() {
    let reg = Arc::new(build_mcp_registry(mock_factory(MockJenkins::new()), None));
    let (mut writer, mut reader) = start_test_server(reg).await;
    let result = initialize(&mut writer, &mut reader).await;
    assert!(
        result["capabilities"]["tools"].is_object(),
        "server must advertise tools capability; got: {result}"
    );
    assert!(
        result["capabilities"]["prompts"].is_object(),
        "server must advertise prompts capability; got: {result}"
    );
}

/// `tools/list` returns all default tools with input schemas.
#[tokio::test]
async fn tools_list_returns_default_tools() {
    let reg = Arc::new(build_mcp_registry(mock_factory(MockJenkins::new()), None));
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {} }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    let tools = resp["result"]["tools"]
        .as_array()
        .expect("tools must be an array");
    assert_eq!(tools.len(), jenq_mcp::DEFAULT_TOOL_NAMES.len());

    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"is_job_exists"), "got: {names:?}");
    assert!(names.contains(&"get_last_build_status"), "got: {names:?}");

    let exists = tools
        .iter()
        .find(|t| t["name"] == "is_job_exists")
        .expect("is_job_exists must be listed");
    assert_eq!(exists["inputSchema"]["type"], "object");
    assert!(exists["inputSchema"]["properties"]["job_name"].is_object());
}

/// A successful `tools/call` against the in-memory Jenkins returns the tool
/// text with `isError: false`.
#[tokio::test]
async fn tools_call_job_exists_round_trip() {
    let reg = Arc::new(build_mcp_registry(
        mock_factory(MockJenkins::new().with_job("demo")),
        None,
    ));
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "is_job_exists",
                "arguments": { "job_name": "demo" }
            }
        }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    assert_eq!(resp["result"]["isError"], false, "got: {resp}");
    let content = resp["result"]["content"]
        .as_array()
        .expect("content must be an array");
    assert_eq!(content[0]["text"], "Job demo exists.");
}

/// A failing tool call sets `isError: true` but is not a protocol error.
#[tokio::test]
async fn tools_call_failure_sets_is_error() {
    let reg = Arc::new(build_mcp_registry(mock_factory(MockJenkins::new()), None));
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "delete_job", "arguments": { "job_name": "ghost" } }
        }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    assert_eq!(resp["result"]["isError"], true, "got: {resp}");
    let content = resp["result"]["content"]
        .as_array()
        .expect("content must be an array");
    assert_eq!(content[0]["text"], "Failed to delete job ghost.");
}

/// Calling an unknown tool returns a tool-level error, not a JSON-RPC error.
#[tokio::test]
async fn tools_call_unknown_tool_returns_is_error() {
    let reg = Arc::new(ToolRegistry::new());
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": { "name": "nonexistent", "arguments": {} }
        }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    let is_tool_error = resp["result"]["isError"] == true;
    let is_rpc_error = resp["error"].is_object();
    assert!(
        is_tool_error || is_rpc_error,
        "unknown tool must produce an error; got: {resp}"
    );
}

/// A full mutation round-trip: create a job, then observe it via search.
#[tokio::test]
async fn tools_call_create_then_search() {
    let reg = Arc::new(build_mcp_registry(mock_factory(MockJenkins::new()), None));
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0", "id": 5,
            "method": "tools/call",
            "params": { "name": "create_job", "arguments": { "job_name": "nightly" } }
        }),
    )
    .await;
    let resp = recv_msg(&mut reader).await;
    assert_eq!(
        resp["result"]["content"][0]["text"],
        "Successfully created job nightly."
    );

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0", "id": 6,
            "method": "tools/call",
            "params": { "name": "search_job", "arguments": { "search_string": "night" } }
        }),
    )
    .await;
    let resp = recv_msg(&mut reader).await;
    assert_eq!(
        resp["result"]["content"][0]["text"],
        r#"Found 1 jobs: ["nightly"]"#
    );
}

/// Filtered registry only exposes the requested tools.
#[tokio::test]
async fn filtered_registry_limits_exposed_tools() {
    let reg = Arc::new(build_mcp_registry(
        mock_factory(MockJenkins::new()),
        Some("is_job_exists,get_views"),
    ));
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list", "params": {} }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    let tools = resp["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 2);
}

/// `prompts/list` returns all thirteen templated prompts.
#[tokio::test]
async fn prompts_list_returns_all_prompts() {
    let reg = Arc::new(ToolRegistry::new());
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({ "jsonrpc": "2.0", "id": 8, "method": "prompts/list", "params": {} }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    let prompts = resp["result"]["prompts"]
        .as_array()
        .expect("prompts must be an array");
    assert_eq!(prompts.len(), 13);
    let names: Vec<&str> = prompts.iter().filter_map(|p| p["name"].as_str()).collect();
    assert!(names.contains(&"prompt_build_job"), "got: {names:?}");
    assert!(names.contains(&"prompt_get_views"), "got: {names:?}");
}

/// `prompts/get` substitutes arguments into the template.
#[tokio::test]
async fn prompts_get_substitutes_arguments() {
    let reg = Arc::new(ToolRegistry::new());
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "prompts/get",
            "params": {
                "name": "prompt_clone_job",
                "arguments": { "job_name": "demo", "new_job_name": "demo-copy" }
            }
        }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    let messages = resp["result"]["messages"]
        .as_array()
        .expect("messages must be an array");
    assert_eq!(messages.len(), 2, "persona plus template");
    let body = messages[1]["content"]["text"].as_str().expect("text body");
    assert!(body.contains("\"demo\""));
    assert!(body.contains("\"demo-copy\""));
}

/// `prompts/get` with a missing required argument is a JSON-RPC error.
#[tokio::test]
async fn prompts_get_missing_argument_is_protocol_error() {
    let reg = Arc::new(ToolRegistry::new());
    let (mut writer, mut reader) = start_test_server(reg).await;
    initialize(&mut writer, &mut reader).await;

    send_msg(
        &mut writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 10,
            "method": "prompts/get",
            "params": { "name": "prompt_delete_job", "arguments": {} }
        }),
    )
    .await;

    let resp = recv_msg(&mut reader).await;
    assert!(
        resp["error"].is_object(),
        "missing required argument must be a protocol error; got: {resp}"
    );
}
