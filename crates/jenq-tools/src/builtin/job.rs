// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Job management tools.

use std::sync::Arc;

use async_trait::async_trait;
use jenq_client::ClientFactory;
use serde_json::{json, Value};

use crate::builtin::{bool_or, connect, opt_params, opt_str, render_list, render_object, require_str};
use crate::tool::{Tool, ToolCall, ToolOutput};

pub struct IsJobExistsTool {
    factory: Arc<dyn ClientFactory>,
}

impl IsJobExistsTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for IsJobExistsTool {
    fn name(&self) -> &str {
        "is_job_exists"
    }

    fn description(&self) -> &str {
        "Check if a job exists on the Jenkins server."
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
        match jenkins.job_exists(&job_name).await {
            Ok(true) => ToolOutput::ok(&call.id, format!("Job {job_name} exists.")),
            Ok(false) => ToolOutput::ok(&call.id, format!("Job {job_name} does not exist.")),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to check if job {job_name} exists."),
            ),
        }
    }
}

pub struct IsJobQueuedOrRunningTool {
    factory: Arc<dyn ClientFactory>,
}

impl IsJobQueuedOrRunningTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for IsJobQueuedOrRunningTool {
    fn name(&self) -> &str {
        "is_job_queued_or_running"
    }

    fn description(&self) -> &str {
        "Check if a job is queued or running on the Jenkins server."
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
        match jenkins.job_queued_or_running(&job_name).await {
            Ok(true) => ToolOutput::ok(&call.id, format!("Job {job_name} is queued or running.")),
            Ok(false) => {
                ToolOutput::ok(&call.id, format!("Job {job_name} is not queued or running."))
            }
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to check if job {job_name} is queued or running."),
            ),
        }
    }
}

pub struct GetJobDefaultParamsTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetJobDefaultParamsTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetJobDefaultParamsTool {
    fn name(&self) -> &str {
        "get_job_default_params"
    }

    fn description(&self) -> &str {
        "Get default parameters for a job from the Jenkins server."
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
        match jenkins.job_default_params(&job_name).await {
            Ok(params) => ToolOutput::ok(
                &call.id,
                format!(
                    "Job {job_name} default parameters: {}",
                    render_object(&params)
                ),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to get default parameters for job {job_name}."),
            ),
        }
    }
}

pub struct GetJobBaseurlTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetJobBaseurlTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetJobBaseurlTool {
    fn name(&self) -> &str {
        "get_job_baseurl"
    }

    fn description(&self) -> &str {
        "Get the base URL of a job from the Jenkins server."
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
        match jenkins.job_base_url(&job_name).await {
            Ok(url) => ToolOutput::ok(&call.id, format!("Job {job_name} base URL: {url}")),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to get base URL for job {job_name}."),
            ),
        }
    }
}

pub struct SearchJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl SearchJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for SearchJobTool {
    fn name(&self) -> &str {
        "search_job"
    }

    fn description(&self) -> &str {
        "Search for jobs by name on the Jenkins server. The search string is \
         matched literally as a substring; scope the search to a view with \
         view_name."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "search_string": {
                    "type": "string",
                    "description": "The pattern to search for in job names"
                },
                "view_name": {
                    "type": "string",
                    "description": "The name of the view to search within"
                },
                "is_case_sensitive": {
                    "type": "boolean",
                    "description": "Whether the search should be case sensitive (default true)"
                }
            },
            "required": ["search_string"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let search_string = match require_str(call, "search_string") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let view_name = opt_str(call, "view_name");
        let case_sensitive = bool_or(call, "is_case_sensitive", true);
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins
            .search_job(&search_string, view_name.as_deref(), case_sensitive)
            .await
        {
            Ok(matching) if !matching.is_empty() => ToolOutput::ok(
                &call.id,
                format!("Found {} jobs: {}", matching.len(), render_list(&matching)),
            ),
            Ok(_) => ToolOutput::ok(&call.id, "No matching jobs found."),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to search jobs matching {search_string}."),
            ),
        }
    }
}

pub struct CreateJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl CreateJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for CreateJobTool {
    fn name(&self) -> &str {
        "create_job"
    }

    fn description(&self) -> &str {
        "Create a new job on the Jenkins server. Without config_xml an empty \
         freestyle job is created."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": { "type": "string", "description": "The name of the job" },
                "config_xml": {
                    "type": "string",
                    "description": "The XML configuration for the job"
                }
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
        let config_xml = opt_str(call, "config_xml");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.create_job(&job_name, config_xml.as_deref()).await {
            Ok(_) => ToolOutput::ok(&call.id, format!("Successfully created job {job_name}.")),
            Err(_) => ToolOutput::err(&call.id, format!("Failed to create job {job_name}.")),
        }
    }
}

pub struct CloneJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl CloneJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for CloneJobTool {
    fn name(&self) -> &str {
        "clone_job"
    }

    fn description(&self) -> &str {
        "Clone or copy an existing job on the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": { "type": "string", "description": "The name of the job" },
                "new_job_name": {
                    "type": "string",
                    "description": "The name of the new cloned job"
                }
            },
            "required": ["job_name", "new_job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let new_job_name = match require_str(call, "new_job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.clone_job(&job_name, &new_job_name).await {
            Ok(_) => ToolOutput::ok(
                &call.id,
                format!("Successfully cloned job {job_name} to {new_job_name}."),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to clone job {job_name} to {new_job_name}."),
            ),
        }
    }
}

pub struct RenameJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl RenameJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for RenameJobTool {
    fn name(&self) -> &str {
        "rename_job"
    }

    fn description(&self) -> &str {
        "Rename an existing job on the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": { "type": "string", "description": "The name of the job" },
                "new_job_name": {
                    "type": "string",
                    "description": "The new name for the job"
                }
            },
            "required": ["job_name", "new_job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let new_job_name = match require_str(call, "new_job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.rename_job(&job_name, &new_job_name).await {
            Ok(_) => ToolOutput::ok(
                &call.id,
                format!("Successfully renamed job {job_name} to {new_job_name}."),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to rename job {job_name} to {new_job_name}."),
            ),
        }
    }
}

pub struct DeleteJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl DeleteJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for DeleteJobTool {
    fn name(&self) -> &str {
        "delete_job"
    }

    fn description(&self) -> &str {
        "Delete a specific job on the Jenkins server."
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
        match jenkins.delete_job(&job_name).await {
            Ok(()) => ToolOutput::ok(&call.id, format!("Successfully deleted job {job_name}.")),
            Err(_) => ToolOutput::err(&call.id, format!("Failed to delete job {job_name}.")),
        }
    }
}

pub struct BuildJobTool {
    factory: Arc<dyn ClientFactory>,
}

impl BuildJobTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for BuildJobTool {
    fn name(&self) -> &str {
        "build_job"
    }

    fn description(&self) -> &str {
        "Trigger a build for a specific job on the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_name": {
                    "type": "string",
                    "description": "The name of the job to build"
                },
                "params": {
                    "type": "object",
                    "description": "Build parameters to pass to the job"
                }
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
        let params = opt_params(call, "params");
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.build_job(&job_name, params.as_deref()).await {
            Ok(()) => ToolOutput::ok(
                &call.id,
                format!("Successfully triggered build for job {job_name}."),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to trigger build for job {job_name}."),
            ),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jenq_client::mock::{FailingFactory, FailingJenkins, MockJenkins, StaticFactory};
    use jenq_client::ClientFactory;
    use serde_json::json;

    use super::*;

    fn factory(mock: MockJenkins) -> Arc<dyn ClientFactory> {
        Arc::new(StaticFactory(Arc::new(mock)))
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "j1".into(),
            name: name.into(),
            args,
        }
    }

    #[tokio::test]
    async fn exists_reports_both_outcomes() {
        let t = IsJobExistsTool::new(factory(MockJenkins::new().with_job("demo")));
        let out = t.execute(&call("is_job_exists", json!({"job_name": "demo"}))).await;
        assert_eq!(out.content, "Job demo exists.");
        let out = t.execute(&call("is_job_exists", json!({"job_name": "ghost"}))).await;
        assert_eq!(out.content, "Job ghost does not exist.");
        assert!(!out.is_error);
    }

    #[tokio::test]
    async fn missing_job_name_is_an_argument_error() {
        let t = IsJobExistsTool::new(factory(MockJenkins::new()));
        let out = t.execute(&call("is_job_exists", json!({}))).await;
        assert!(out.is_error);
        assert!(out.content.contains("missing required parameter 'job_name'"));
    }

    #[tokio::test]
    async fn queued_absent_job_is_a_plain_no() {
        let t = IsJobQueuedOrRunningTool::new(factory(MockJenkins::new()));
        let out = t
            .execute(&call("is_job_queued_or_running", json!({"job_name": "ghost"})))
            .await;
        assert!(!out.is_error);
        assert_eq!(out.content, "Job ghost is not queued or running.");
    }

    #[tokio::test]
    async fn default_params_render_as_json_object() {
        let t = GetJobDefaultParamsTool::new(factory(
            MockJenkins::new().with_param_job("demo", &[("ENV", json!("staging"))]),
        ));
        let out = t
            .execute(&call("get_job_default_params", json!({"job_name": "demo"})))
            .await;
        assert_eq!(
            out.content,
            r#"Job demo default parameters: {"ENV":"staging"}"#
        );
    }

    #[tokio::test]
    async fn search_renders_count_and_list() {
        let t = SearchJobTool::new(factory(
            MockJenkins::new().with_job("demo-a").with_job("demo-b").with_job("other"),
        ));
        let out = t
            .execute(&call("search_job", json!({"search_string": "demo"})))
            .await;
        assert_eq!(out.content, r#"Found 2 jobs: ["demo-a","demo-b"]"#);
        let out = t
            .execute(&call("search_job", json!({"search_string": "zzz"})))
            .await;
        assert_eq!(out.content, "No matching jobs found.");
    }

    #[tokio::test]
    async fn not_found_and_remote_fault_both_render_as_failed() {
        let absent = DeleteJobTool::new(factory(MockJenkins::new()));
        let out = absent.execute(&call("delete_job", json!({"job_name": "x"}))).await;
        assert!(out.is_error);
        assert_eq!(out.content, "Failed to delete job x.");

        let faulty = DeleteJobTool::new(Arc::new(StaticFactory(Arc::new(FailingJenkins))));
        let out = faulty.execute(&call("delete_job", json!({"job_name": "x"}))).await;
        assert!(out.is_error);
        assert_eq!(out.content, "Failed to delete job x.");
    }

    #[tokio::test]
    async fn dead_handle_renders_connect_failure() {
        let t = IsJobExistsTool::new(Arc::new(FailingFactory));
        let out = t.execute(&call("is_job_exists", json!({"job_name": "demo"}))).await;
        assert!(out.is_error);
        assert!(out.content.starts_with("Failed to connect to Jenkins server"));
    }

    #[tokio::test]
    async fn build_job_forwards_params_in_order() {
        let mock = Arc::new(
            MockJenkins::new().with_param_job("demo", &[("ENV", json!("staging"))]),
        );
        let t = BuildJobTool::new(Arc::new(StaticFactory(mock.clone())));
        let out = t
            .execute(&call(
                "build_job",
                json!({"job_name": "demo", "params": {"ENV": "prod", "DRY": true}}),
            ))
            .await;
        assert_eq!(out.content, "Successfully triggered build for job demo.");
        let triggered = mock.triggered();
        assert_eq!(
            triggered[0].1.as_deref(),
            Some(
                &[
                    ("ENV".to_string(), json!("prod")),
                    ("DRY".to_string(), json!(true)),
                ][..]
            )
        );
    }

    #[tokio::test]
    async fn create_clone_rename_delete_lifecycle() {
        let mock = Arc::new(MockJenkins::new());
        let f: Arc<dyn ClientFactory> = Arc::new(StaticFactory(mock.clone()));

        let out = CreateJobTool::new(f.clone())
            .execute(&call("create_job", json!({"job_name": "a"})))
            .await;
        assert_eq!(out.content, "Successfully created job a.");

        let out = CloneJobTool::new(f.clone())
            .execute(&call("clone_job", json!({"job_name": "a", "new_job_name": "b"})))
            .await;
        assert_eq!(out.content, "Successfully cloned job a to b.");

        let out = RenameJobTool::new(f.clone())
            .execute(&call("rename_job", json!({"job_name": "b", "new_job_name": "c"})))
            .await;
        assert_eq!(out.content, "Successfully renamed job b to c.");

        let out = DeleteJobTool::new(f.clone())
            .execute(&call("delete_job", json!({"job_name": "c"})))
            .await;
        assert_eq!(out.content, "Successfully deleted job c.");
    }
}
