// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Type conversions between jenq's tool types and rmcp's MCP model types.
//!
//! These are pure, stateless functions.  The bridge sits at the seam between
//! the [`jenq_tools`] crate and the MCP wire protocol so neither side needs
//! to know about the other.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool as McpTool};
use jenq_tools::{ToolOutput, ToolSchema};

/// Convert a [`ToolSchema`] into an rmcp [`McpTool`] descriptor.
///
/// The JSON Schema stored in [`ToolSchema::parameters`] is already valid
/// JSON Schema produced by each tool's `parameters_schema` implementation,
/// so it passes through as the `input_schema` without further processing.
pub fn schema_to_mcp_tool(schema: ToolSchema) -> McpTool {
    let input_schema: JsonObject = value_to_object(schema.parameters);
    McpTool::new(
        std::borrow::Cow::Owned(schema.name),
        std::borrow::Cow::Owned(schema.description),
        Arc::new(input_schema),
    )
}

/// Build a [`JsonObject`] (serde_json::Map) from a raw JSON Schema value.
///
/// MCP requires the schema to be a JSON object; a non-object value is
/// wrapped in a minimal `{"type":"object"}` envelope.
fn value_to_object(v: serde_json::Value) -> JsonObject {
    use serde_json::{Map, Value};
    match v {
        Value::Object(m) => m,
        other => {
            let mut m = Map::new();
            m.insert("type".to_string(), Value::String("object".to_string()));
            m.insert("value".to_string(), other);
            m
        }
    }
}

/// Convert a [`ToolOutput`] into an rmcp [`CallToolResult`].
///
/// jenq tools only produce text; the MCP `is_error` flag mirrors
/// [`ToolOutput::is_error`].
pub fn output_to_call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.content)];
    if output.is_error {
        CallToolResult {
            content,
            is_error: Some(true),
            structured_content: None,
            meta: None,
        }
    } else {
        CallToolResult::success(content)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
