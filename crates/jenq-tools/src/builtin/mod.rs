pub mod build;
pub mod job;
pub mod view;

use std::sync::Arc;

use jenq_client::ClientFactory;
use jenq_core::Jenkins;
use serde_json::{Map, Value};

use crate::tool::{ToolCall, ToolOutput};

/// Open a freshly authenticated façade for one tool invocation.  A failed
/// login becomes the tool's error output instead of tearing the server down.
pub(crate) async fn connect(
    factory: &Arc<dyn ClientFactory>,
    call_id: &str,
) -> Result<Jenkins, ToolOutput> {
    match factory.connect().await {
        Ok(client) => Ok(Jenkins::new(client)),
        Err(e) => Err(ToolOutput::err(
            call_id,
            format!("Failed to connect to Jenkins server: {e}"),
        )),
    }
}

pub(crate) fn require_str(call: &ToolCall, key: &str) -> Result<String, ToolOutput> {
    match call.args.get(key).and_then(|v| v.as_str()) {
        Some(s) => Ok(s.to_string()),
        None => {
            let args_preview =
                serde_json::to_string(&call.args).unwrap_or_else(|_| "null".to_string());
            Err(ToolOutput::err(
                &call.id,
                format!("missing required parameter '{key}'. Received: {args_preview}"),
            ))
        }
    }
}

pub(crate) fn opt_str(call: &ToolCall, key: &str) -> Option<String> {
    call.args
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

pub(crate) fn opt_u32(call: &ToolCall, key: &str) -> Option<u32> {
    call.args
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as u32)
}

pub(crate) fn bool_or(call: &ToolCall, key: &str, default: bool) -> bool {
    call.args
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

/// An optional JSON-object argument as ordered key/value pairs.
pub(crate) fn opt_params(call: &ToolCall, key: &str) -> Option<Vec<(String, Value)>> {
    call.args.get(key).and_then(|v| v.as_object()).map(|map| {
        map.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    })
}

/// Compact JSON rendering of ordered pairs as an object.
pub(crate) fn render_object(pairs: &[(String, Value)]) -> String {
    let map: Map<String, Value> = pairs.iter().cloned().collect();
    serde_json::to_string(&Value::Object(map)).unwrap_or_else(|_| "{}".to_string())
}

/// Compact JSON rendering of a string list.
pub(crate) fn render_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
