// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! `jenq-mcp` — MCP (Model Context Protocol) server for jenq.
//!
//! Exposes Jenkins job, view and build management tools, plus templated
//! workflow prompts, to any MCP-compatible host (Cursor, Claude Desktop,
//! opencode, codex, etc.) over **stdio** transport using line-delimited
//! JSON-RPC.
//!
//! # Quick start
//!
//! ```text
//! jenq serve
//! ```
//!
//! # MCP client configuration
//!
//! ## Cursor / Claude Desktop (`mcp.json`)
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "jenkins": {
//!       "command": "jenq",
//!       "args": ["serve"],
//!       "env": {
//!         "JENKINS_URL": "http://jenkins.example.com:8080",
//!         "JENKINS_USERNAME": "ci-bot",
//!         "JENKINS_TOKEN": "<api token>"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! ## Custom tool subset
//!
//! ```text
//! jenq serve --tools is_job_exists,search_job,get_last_build_status
//! ```
//!
//! # Architecture
//!
//! ```text
//! MCP client (Cursor, Claude Desktop, …)
//!       │  stdin/stdout (line-delimited JSON-RPC)
//!       ▼
//! JenqMcpServer (rmcp ServerHandler)
//!       │
//!       ▼
//! ToolRegistry  ──►  Tool::execute()  ──►  Jenkins façade  ──►  Jenkins REST API
//! ```

pub mod bridge;
pub mod prompts;
pub mod registry;
pub mod server;

pub use prompts::PromptRegistry;
pub use registry::{build_mcp_registry, DEFAULT_TOOL_NAMES};
pub use server::JenqMcpServer;

use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use jenq_tools::ToolRegistry;

/// Start an MCP stdio server, serving the tools in `registry` and the
/// prompts in `prompts` on `stdin` / `stdout`.
///
/// This function blocks until the client disconnects (stdin EOF) or the
/// process is terminated.  It is designed to be called as the sole
/// operation of the `jenq serve` subcommand.
///
/// # Errors
///
/// Returns an error if the rmcp transport fails to initialize or if the
/// server encounters a fatal I/O error.
pub async fn serve_stdio(registry: Arc<ToolRegistry>, prompts: Arc<PromptRegistry>) -> Result<()> {
    let server = JenqMcpServer::new(registry, prompts);
    let running = server
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|e| anyhow::anyhow!("MCP server init error: {e}"))?;
    running
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;
    Ok(())
}
