// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Default tool registry for the jenq MCP server.
//!
//! All job, view and build tools share one [`ClientFactory`]; each tool
//! opens its own Jenkins connection per invocation, so the registry holds
//! no live connection state.

use std::sync::Arc;

use jenq_client::ClientFactory;
use jenq_tools::builtin::build::{
    GetLastBuildConsoleTool, GetLastBuildDurationTool, GetLastBuildNumberTool,
    GetLastBuildParamsTool, GetLastBuildStartTimeTool, GetLastBuildStatusTool, StopLastBuildTool,
};
use jenq_tools::builtin::job::{
    BuildJobTool, CloneJobTool, CreateJobTool, DeleteJobTool, GetJobBaseurlTool,
    GetJobDefaultParamsTool, IsJobExistsTool, IsJobQueuedOrRunningTool, RenameJobTool,
    SearchJobTool,
};
use jenq_tools::builtin::view::{
    AddJobToViewTool, GetJobsFromViewTool, GetViewBaseurlTool, GetViewsTool,
    RemoveJobFromViewTool,
};
use jenq_tools::ToolRegistry;

/// Tool names included in the default set.
///
/// These names correspond exactly to the values returned by each tool's
/// `Tool::name()` implementation.  Clients can use this list to discover
/// what `jenq serve` exposes by default.
pub const DEFAULT_TOOL_NAMES: &[&str] = &[
    "add_job_to_view",
    "build_job",
    "clone_job",
    "create_job",
    "delete_job",
    "get_job_baseurl",
    "get_job_default_params",
    "get_jobs_from_view",
    "get_last_build_console",
    "get_last_build_duration",
    "get_last_build_number",
    "get_last_build_params",
    "get_last_build_start_time",
    "get_last_build_status",
    "get_view_baseurl",
    "get_views",
    "is_job_exists",
    "is_job_queued_or_running",
    "remove_job_from_view",
    "rename_job",
    "search_job",
    "stop_last_build",
];

/// Build a [`ToolRegistry`] populated with the default tool set, all backed
/// by `factory`.
///
/// `allowed_names` is an optional comma-separated list of tool names to
/// include.  Pass `"all"` (or `None`) to include everything.  Any name not
/// in [`DEFAULT_TOOL_NAMES`] is silently ignored.
pub fn build_mcp_registry(
    factory: Arc<dyn ClientFactory>,
    allowed_names: Option<&str>,
) -> ToolRegistry {
    let filter: Option<std::collections::HashSet<&str>> = match allowed_names {
        None | Some("all") => None,
        Some(list) => Some(list.split(',').map(|s| s.trim()).collect()),
    };

    let allow = |name: &str| -> bool {
        match &filter {
            None => true,
            Some(set) => set.contains(name),
        }
    };

    let mut reg = ToolRegistry::new();

    if allow("add_job_to_view") {
        reg.register(AddJobToViewTool::new(factory.clone()));
    }
    if allow("build_job") {
        reg.register(BuildJobTool::new(factory.clone()));
    }
    if allow("clone_job") {
        reg.register(CloneJobTool::new(factory.clone()));
    }
    if allow("create_job") {
        reg.register(CreateJobTool::new(factory.clone()));
    }
    if allow("delete_job") {
        reg.register(DeleteJobTool::new(factory.clone()));
    }
    if allow("get_job_baseurl") {
        reg.register(GetJobBaseurlTool::new(factory.clone()));
    }
    if allow("get_job_default_params") {
        reg.register(GetJobDefaultParamsTool::new(factory.clone()));
    }
    if allow("get_jobs_from_view") {
        reg.register(GetJobsFromViewTool::new(factory.clone()));
    }
    if allow("get_last_build_console") {
        reg.register(GetLastBuildConsoleTool::new(factory.clone()));
    }
    if allow("get_last_build_duration") {
        reg.register(GetLastBuildDurationTool::new(factory.clone()));
    }
    if allow("get_last_build_number") {
        reg.register(GetLastBuildNumberTool::new(factory.clone()));
    }
    if allow("get_last_build_params") {
        reg.register(GetLastBuildParamsTool::new(factory.clone()));
    }
    if allow("get_last_build_start_time") {
        reg.register(GetLastBuildStartTimeTool::new(factory.clone()));
    }
    if allow("get_last_build_status") {
        reg.register(GetLastBuildStatusTool::new(factory.clone()));
    }
    if allow("get_view_baseurl") {
        reg.register(GetViewBaseurlTool::new(factory.clone()));
    }
    if allow("get_views") {
        reg.register(GetViewsTool::new(factory.clone()));
    }
    if allow("is_job_exists") {
        reg.register(IsJobExistsTool::new(factory.clone()));
    }
    if allow("is_job_queued_or_running") {
        reg.register(IsJobQueuedOrRunningTool::new(factory.clone()));
    }
    if allow("remove_job_from_view") {
        reg.register(RemoveJobFromViewTool::new(factory.clone()));
    }
    if allow("rename_job") {
        reg.register(RenameJobTool::new(factory.clone()));
    }
    if allow("search_job") {
        reg.register(SearchJobTool::new(factory.clone()));
    }
    if allow("stop_last_build") {
        reg.register(StopLastBuildTool::new(factory.clone()));
    }

    reg
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use jenq_client::mock::{MockJenkins, StaticFactory};

    use super::*;

    fn factory() -> Arc<dyn ClientFactory> {
        Arc::new(StaticFactory(Arc::new(MockJenkins::new())))
    }

    #[test]
    fn default_registry_contains_all_default_tools() {
        let reg = build_mcp_registry(factory(), None);
        let names = reg.names();
        for expected in DEFAULT_TOOL_NAMES {
            assert!(
                names.iter().any(|n| n == expected),
                "expected tool {expected:?} in default registry, got: {names:?}"
            );
        }
    }

    #[test]
    fn all_keyword_includes_all_default_tools() {
        let reg = build_mcp_registry(factory(), Some("all"));
        assert_eq!(reg.names().len(), DEFAULT_TOOL_NAMES.len());
    }

    #[test]
    fn allowed_names_filter_restricts_tools() {
        let reg = build_mcp_registry(factory(), Some("is_job_exists,search_job"));
        assert_eq!(reg.names(), vec!["is_job_exists", "search_job"]);
    }

    #[test]
    fn unknown_tool_name_in_filter_is_ignored() {
        let reg = build_mcp_registry(factory(), Some("is_job_exists,nonexistent_tool"));
        assert_eq!(reg.names(), vec!["is_job_exists"]);
    }

    #[test]
    fn whitespace_around_tool_names_is_trimmed() {
        let reg = build_mcp_registry(factory(), Some(" get_views , delete_job "));
        assert_eq!(reg.names(), vec!["delete_job", "get_views"]);
    }

    #[test]
    fn default_tool_names_constant_is_sorted() {
        let mut sorted = DEFAULT_TOOL_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(
            DEFAULT_TOOL_NAMES,
            sorted.as_slice(),
            "DEFAULT_TOOL_NAMES should be sorted for deterministic output"
        );
    }
}
