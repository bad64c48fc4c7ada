// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Build management tools.
//!
//! The `get_last_build_*` projections accept an optional `build_number`;
//! without it they target the job's most recent build.

use std::sync::Arc;

use async_trait::async_trait;
use jenq_client::ClientFactory;
use serde_json::{json, Value};

use crate::builtin::{connect, opt_u32, render_object, require_str};
use crate::tool::{Tool, ToolCall, ToolOutput};

fn build_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "job_name": { "type": "string", "description": "The name of the job" },
            "build_number": {
                "type": "integer",
                "description": "A specific build number; defaults to the last build"
            }
        },
        "required": ["job_name"],
        "additionalProperties": false
    })
}

pub struct StopLastBuildTool {
    factory: Arc<dyn ClientFactory>,
}

impl StopLastBuildTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for StopLastBuildTool {
    fn name(&self) -> &str {
        "stop_last_build"
    }

    fn description(&self) -> &str {
        "Stop the last build of a job from the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": { "type": "string", "description": "The name of the job" }
            },
            "required": ["job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.stop_last_build(&job_name).await {
            Ok(true) => ToolOutput::ok(
                &call.id,
                format!("Successfully stopped the last build for job {job_name}."),
            ),
            Ok(false) | Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to stop the last build for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildNumberTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildNumberTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildNumberTool {
    fn name(&self) -> &str {
        "get_last_build_number"
    }

    fn description(&self) -> &str {
        "Get the last build number of a job from the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": { "type": "string", "description": "The name of the job" }
            },
            "required": ["job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.last_build_number(&job_name).await {
            Ok(num) => ToolOutput::ok(
                &call.id,
                format!("Successfully retrieved last build number for job {job_name}: {num}"),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build number for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildStartTimeTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildStartTimeTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildStartTimeTool {
    fn name(&self) -> &str {
        "get_last_build_start_time"
    }

    fn description(&self) -> &str {
        "Get the build start time of a job from the Jenkins server, in local time."
    }

    fn parameters_schema(&self) -> Value {
        build_schema()
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let number = opt_u32(call, "build_number");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_start_time(&job_name, number).await {
            Ok(start) => ToolOutput::ok(
                &call.id,
                format!(
                    "Successfully retrieved last build start time for job {job_name}: {}",
                    start.format("%Y-%m-%d %H:%M:%S")
                ),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build start time for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildDurationTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildDurationTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildDurationTool {
    fn name(&self) -> &str {
        "get_last_build_duration"
    }

    fn description(&self) -> &str {
        "Get the build duration of a job from the Jenkins server, in milliseconds."
    }

    fn parameters_schema(&self) -> Value {
        build_schema()
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let number = opt_u32(call, "build_number");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_duration(&job_name, number).await {
            Ok(duration) => ToolOutput::ok(
                &call.id,
                format!(
                    "Successfully retrieved last build duration for job {job_name}: {duration} ms"
                ),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build duration for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildStatusTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildStatusTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildStatusTool {
    fn name(&self) -> &str {
        "get_last_build_status"
    }

    fn description(&self) -> &str {
        "Get the build status of a job from the Jenkins server \
         (SUCCESS, FAILURE or ABORTED)."
    }

    fn parameters_schema(&self) -> Value {
        build_schema()
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let number = opt_u32(call, "build_number");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_status(&job_name, number).await {
            Ok(Some(status)) => ToolOutput::ok(
                &call.id,
                format!("Successfully retrieved last build status for job {job_name}: {status}"),
            ),
            Ok(None) | Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build status for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildParamsTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildParamsTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildParamsTool {
    fn name(&self) -> &str {
        "get_last_build_params"
    }

    fn description(&self) -> &str {
        "Get the parameters a build of a job actually ran with."
    }

    fn parameters_schema(&self) -> Value {
        build_schema()
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let number = opt_u32(call, "build_number");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_params(&job_name, number).await {
            Ok(params) => ToolOutput::ok(
                &call.id,
                format!(
                    "Successfully retrieved last build parameters for job {job_name}: {}",
                    render_object(&params)
                ),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build parameters for job {job_name}."),
            ),
        }
    }
}

pub struct GetLastBuildConsoleTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetLastBuildConsoleTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetLastBuildConsoleTool {
    fn name(&self) -> &str {
        "get_last_build_console"
    }

    fn description(&self) -> &str {
        "Get the console output of a build of a job from the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        build_schema()
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let number = opt_u32(call, "build_number");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_console(&job_name, number).await {
            Ok(console) => ToolOutput::ok(
                &call.id,
                format!(
                    "Successfully retrieved last build console output for job {job_name}: {console}"
                ),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve last build console output for job {job_name}."),
            ),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
