// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! [`JenqMcpServer`] — the rmcp [`ServerHandler`] implementation.
//!
//! Wraps a [`ToolRegistry`] and a [`PromptRegistry`] and implements the MCP
//! `tools/list`, `tools/call`, `prompts/list` and `prompts/get` protocol
//! methods.  All other MCP lifecycle methods (initialize, shutdown, ping)
//! are handled by the default rmcp implementations.
//!
//! The server is stateless: every `call_tool` request executes the tool in
//! isolation, opening its own Jenkins connection and carrying no session
//! state between calls.

use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, GetPromptRequestParams, GetPromptResult,
        ListPromptsResult, ListToolsResult, PaginatedRequestParams, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use jenq_tools::{ToolCall, ToolRegistry};
use uuid::Uuid;

use crate::bridge::{output_to_call_result, schema_to_mcp_tool};
use crate::prompts::PromptRegistry;

/// jenq MCP server — speaks the MCP protocol over any rmcp transport.
///
/// Create with [`JenqMcpServer::new`] and then call
/// [`rmcp::ServiceExt::serve`] to start serving on a transport.
#[derive(Clone)]
pub struct JenqMcpServer {
    registry: Arc<ToolRegistry>,
    prompts: Arc<PromptRegistry>,
}

impl JenqMcpServer {
    pub fn new(registry: Arc<ToolRegistry>, prompts: Arc<PromptRegistry>) -> Self {
        Self { registry, prompts }
    }
}

impl ServerHandler for JenqMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let registry = self.registry.clone();
        async move {
            let tools = registry
                .schemas()
                .into_iter()
                .map(schema_to_mcp_tool)
                .collect();
            Ok(ListToolsResult {
                tools,
                next_cursor: None,
                meta: None,
            })
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(|m| serde_json::Value::Object(m.into_iter().collect()))
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let call = ToolCall {
            id: Uuid::new_v4().to_string(),
            name: request.name.to_string(),
            args,
        };

        let output = self.registry.execute(&call).await;
        Ok(output_to_call_result(output))
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListPromptsResult, McpError>> + Send + '_ {
        let prompts = self.prompts.clone();
        async move {
            Ok(ListPromptsResult {
                prompts: prompts.list(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<GetPromptResult, McpError>> + Send + '_ {
        let prompts = self.prompts.clone();
        async move { prompts.render(&request.name, request.arguments.as_ref()) }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
//
// These tests cover the parts of JenqMcpServer that can be tested without an
// active transport or RequestContext.  The full list/call round-trips are
// covered by the integration tests in tests/integration.rs.
