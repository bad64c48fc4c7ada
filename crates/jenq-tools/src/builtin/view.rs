// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! View management tools.

use std::sync::Arc;

use async_trait::async_trait;
use jenq_client::ClientFactory;
use serde_json::{json, Value};

use crate::builtin::{connect, render_list, require_str};
use crate::tool::{Tool, ToolCall, ToolOutput};

pub struct GetViewsTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetViewsTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetViewsTool {
    fn name(&self) -> &str {
        "get_views"
    }

    fn description(&self) -> &str {
        "Get all views from the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.views().await {
            Ok(views) if !views.is_empty() => ToolOutput::ok(
                &call.id,
                format!("Found {} views: {}", views.len(), render_list(&views)),
            ),
            Ok(_) => ToolOutput::ok(&call.id, "No views found."),
            Err(_) => ToolOutput::err(&call.id, "Failed to get views."),
        }
    }
}

pub struct GetJobsFromViewTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetJobsFromViewTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetJobsFromViewTool {
    fn name(&self) -> &str {
        "get_jobs_from_view"
    }

    fn description(&self) -> &str {
        "Get all jobs from a view on the Jenkins server. Falls back to the \
         authenticated user's personal views when the view is not global."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "view_name": { "type": "string", "description": "The name of the view" }
            },
            "required": ["view_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let view_name = match require_str(call, "view_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.jobs_from_view(&view_name).await {
            Ok(jobs) if !jobs.is_empty() => ToolOutput::ok(
                &call.id,
                format!(
                    "View {view_name} contains {} jobs: {}",
                    jobs.len(),
                    render_list(&jobs)
                ),
            ),
            Ok(_) => ToolOutput::ok(&call.id, format!("No jobs found in view {view_name}.")),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to get jobs from view {view_name}."),
            ),
        }
    }
}

pub struct GetViewBaseurlTool {
    factory: Arc<dyn ClientFactory>,
}

impl GetViewBaseurlTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for GetViewBaseurlTool {
    fn name(&self) -> &str {
        "get_view_baseurl"
    }

    fn description(&self) -> &str {
        "Get the base URL of a specific view from the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "view_name": { "type": "string", "description": "The name of the view" }
            },
            "required": ["view_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let view_name = match require_str(call, "view_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.view_base_url(&view_name).await {
            Ok(url) => ToolOutput::ok(
                &call.id,
                format!("Successfully retrieved base URL for view {view_name}: {url}"),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to retrieve base URL for view {view_name}."),
            ),
        }
    }
}

pub struct AddJobToViewTool {
    factory: Arc<dyn ClientFactory>,
}

impl AddJobToViewTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for AddJobToViewTool {
    fn name(&self) -> &str {
        "add_job_to_view"
    }

    fn description(&self) -> &str {
        "Add a job to a specific view on the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "view_name": { "type": "string", "description": "The name of the view" },
                "job_name": { "type": "string", "description": "The name of the job" }
            },
            "required": ["view_name", "job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let view_name = match require_str(call, "view_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.add_job_to_view(&view_name, &job_name).await {
            Ok(()) => ToolOutput::ok(
                &call.id,
                format!("Successfully added job {job_name} to view {view_name}."),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to add job {job_name} to view {view_name}."),
            ),
        }
    }
}

pub struct RemoveJobFromViewTool {
    factory: Arc<dyn ClientFactory>,
}

impl RemoveJobFromViewTool {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl Tool for RemoveJobFromViewTool {
    fn name(&self) -> &str {
        "remove_job_from_view"
    }

    fn description(&self) -> &str {
        "Remove a job from a specific view on the Jenkins server."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "view_name": { "type": "string", "description": "The name of the view" },
                "job_name": { "type": "string", "description": "The name of the job" }
            },
            "required": ["view_name", "job_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let view_name = match require_str(call, "view_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let job_name = match require_str(call, "job_name") {
            Ok(v) => v,
            Err(out) => return out,
        };
        let jenkins = match connect(&self.factory, &call.id).await {
            Ok(j) => j,
            Err(out) => return out,
        };
        match jenkins.remove_job_from_view(&view_name, &job_name).await {
            Ok(()) => ToolOutput::ok(
                &call.id,
                format!("Successfully removed job {job_name} from view {view_name}."),
            ),
            Err(_) => ToolOutput::err(
                &call.id,
                format!("Failed to remove job {job_name} from view {view_name}."),
            ),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jenq_client::mock::{MockJenkins, StaticFactory};
    use jenq_client::ClientFactory;
    use serde_json::json;

    use super::*;

    fn factory(mock: MockJenkins) -> Arc<dyn ClientFactory> {
        Arc::new(StaticFactory(Arc::new(mock)))
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "v1".into(),
            name: name.into(),
            args,
        }
    }

    #[tokio::test]
    async fn get_views_renders_count_and_list() {
        let t = GetViewsTool::new(factory(
            MockJenkins::new().with_view("Team-A", &[]).with_view("Team-B", &[]),
        ));
        let out = t.execute(&call("get_views", json!({}))).await;
        assert_eq!(out.content, r#"Found 2 views: ["Team-A","Team-B"]"#);
    }

    #[tokio::test]
    async fn no_views_is_a_plain_message() {
        let t = GetViewsTool::new(factory(MockJenkins::new()));
        let out = t.execute(&call("get_views", json!({}))).await;
        assert!(!out.is_error);
        assert_eq!(out.content, "No views found.");
    }

    #[tokio::test]
    async fn empty_view_and_missing_view_render_differently() {
        let t = GetJobsFromViewTool::new(factory(MockJenkins::new().with_view("empty", &[])));
        let out = t
            .execute(&call("get_jobs_from_view", json!({"view_name": "empty"})))
            .await;
        assert!(!out.is_error);
        assert_eq!(out.content, "No jobs found in view empty.");
        let out = t
            .execute(&call("get_jobs_from_view", json!({"view_name": "ghost"})))
            .await;
        assert!(out.is_error);
        assert_eq!(out.content, "Failed to get jobs from view ghost.");
    }

    #[tokio::test]
    async fn personal_views_resolve_through_fallback() {
        let t = GetJobsFromViewTool::new(factory(
            MockJenkins::new().with_my_view("mine", &["p1", "p2"]),
        ));
        let out = t
            .execute(&call("get_jobs_from_view", json!({"view_name": "mine"})))
            .await;
        assert_eq!(out.content, r#"View mine contains 2 jobs: ["p1","p2"]"#);
    }

    #[tokio::test]
    async fn add_and_remove_round_trip() {
        let mock = Arc::new(
            MockJenkins::new().with_job("demo").with_view("Team-A", &[]),
        );
        let f: Arc<dyn ClientFactory> = Arc::new(StaticFactory(mock.clone()));

        let out = AddJobToViewTool::new(f.clone())
            .execute(&call(
                "add_job_to_view",
                json!({"view_name": "Team-A", "job_name": "demo"}),
            ))
            .await;
        assert_eq!(out.content, "Successfully added job demo to view Team-A.");

        let out = RemoveJobFromViewTool::new(f.clone())
            .execute(&call(
                "remove_job_from_view",
                json!({"view_name": "Team-A", "job_name": "demo"}),
            ))
            .await;
        assert_eq!(out.content, "Successfully removed job demo from view Team-A.");
    }

    #[tokio::test]
    async fn add_to_missing_view_fails() {
        let t = AddJobToViewTool::new(factory(MockJenkins::new().with_job("demo")));
        let out = t
            .execute(&call(
                "add_job_to_view",
                json!({"view_name": "ghost", "job_name": "demo"}),
            ))
            .await;
        assert!(out.is_error);
        assert_eq!(out.content, "Failed to add job demo to view ghost.");
    }
}
