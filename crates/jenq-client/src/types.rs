// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Serde models for the subset of the Jenkins JSON API that jenq consumes.
//!
//! Field names mirror the wire format (`camelCase` via serde renames);
//! everything jenq does not read is simply not modelled, so unknown fields
//! are ignored on deserialization.

use serde::Deserialize;
use serde_json::Value;

/// The default job definition used by `create_job` when the caller supplies
/// no configuration document: a minimal freestyle project with no SCM,
/// triggers, builders, or publishers.
pub const EMPTY_CONFIG_XML: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<project>
  <keepDependencies>false</keepDependencies>
  <properties/>
  <scm class="hudson.scm.NullSCM"/>
  <canRoam>true</canRoam>
  <disabled>false</disabled>
  <blockBuildWhenDownstreamBuilding>false</blockBuildWhenDownstreamBuilding>
  <blockBuildWhenUpstreamBuilding>false</blockBuildWhenUpstreamBuilding>
  <triggers/>
  <concurrentBuild>false</concurrentBuild>
  <builders/>
  <publishers/>
  <buildWrappers/>
</project>"#;

/// One entry of the server's top-level `jobs` array.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSummary {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One entry of the server's top-level `views` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSummary {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Full job document from `/job/{name}/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDetails {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "inQueue")]
    pub in_queue: bool,
    /// Ball colour; a `_anime` suffix means a build is in progress.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub property: Vec<JobProperty>,
    #[serde(default, rename = "lastBuild")]
    pub last_build: Option<BuildRef>,
}

impl JobDetails {
    /// Whether the job is queued or currently building.
    pub fn queued_or_running(&self) -> bool {
        self.in_queue
            || self
                .color
                .as_deref()
                .is_some_and(|c| c.ends_with("_anime"))
    }

    /// Flatten the parameter definitions into `(name, default value)` pairs,
    /// preserving the server's declaration order.  Definitions without a
    /// `defaultParameterValue` are skipped, as the original surface did.
    pub fn default_params(&self) -> Vec<(String, Value)> {
        self.property
            .iter()
            .flat_map(|p| p.parameter_definitions.iter())
            .filter_map(|d| {
                d.default_parameter_value
                    .as_ref()
                    .map(|v| (v.name.clone(), v.value.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobProperty {
    #[serde(default, rename = "parameterDefinitions")]
    pub parameter_definitions: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default, rename = "defaultParameterValue")]
    pub default_parameter_value: Option<DefaultParameterValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultParameterValue {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Lightweight pointer to a build, as embedded in a job document.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildRef {
    pub number: u32,
}

/// Full view document from `/view/{name}/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewDetails {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

/// Full build document from `/job/{name}/{number}/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub number: u32,
    /// Start time in milliseconds since the epoch, UTC.
    #[serde(default)]
    pub timestamp: i64,
    /// Wall-clock duration in milliseconds; 0 while the build is running.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub actions: Vec<BuildAction>,
}

impl Build {
    /// Terminal status, absent while the build is incomplete or when the
    /// server reports a result outside the closed set.
    pub fn status(&self) -> Option<BuildStatus> {
        self.result.as_deref().and_then(BuildStatus::parse)
    }

    /// The parameters this run was triggered with, in the server's order.
    pub fn params(&self) -> Vec<(String, Value)> {
        self.actions
            .iter()
            .flat_map(|a| a.parameters.iter())
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildAction {
    #[serde(default)]
    pub parameters: Vec<BuildParameter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildParameter {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Terminal build result, reduced to the closed set the tools report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failure,
    Aborted,
}

impl BuildStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(BuildStatus::Success),
            "FAILURE" => Some(BuildStatus::Failure),
            "ABORTED" => Some(BuildStatus::Aborted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Failure => "FAILURE",
            BuildStatus::Aborted => "ABORTED",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_details_parses_parameter_definitions() {
        let job: JobDetails = serde_json::from_value(json!({
            "name": "demo",
            "url": "http://ci/job/demo/",
            "inQueue": false,
            "color": "blue",
            "property": [
                {"_class": "hudson.model.ParametersDefinitionProperty",
                 "parameterDefinitions": [
                    {"name": "ENV",
                     "defaultParameterValue": {"name": "ENV", "value": "staging"}},
                    {"name": "NO_DEFAULT"}
                 ]},
                {"_class": "some.other.Property"}
            ]
        }))
        .unwrap();
        let params = job.default_params();
        assert_eq!(params, vec![("ENV".to_string(), json!("staging"))]);
    }

    #[test]
    fn queued_or_running_from_queue_flag() {
        let job: JobDetails =
            serde_json::from_value(json!({"name": "a", "inQueue": true})).unwrap();
        assert!(job.queued_or_running());
    }

    #[test]
    fn queued_or_running_from_anime_color() {
        let job: JobDetails =
            serde_json::from_value(json!({"name": "a", "color": "blue_anime"})).unwrap();
        assert!(job.queued_or_running());
    }

    #[test]
    fn idle_job_is_not_running() {
        let job: JobDetails =
            serde_json::from_value(json!({"name": "a", "color": "blue"})).unwrap();
        assert!(!job.queued_or_running());
    }

    #[test]
    fn build_status_closed_set() {
        assert_eq!(BuildStatus::parse("SUCCESS"), Some(BuildStatus::Success));
        assert_eq!(BuildStatus::parse("FAILURE"), Some(BuildStatus::Failure));
        assert_eq!(BuildStatus::parse("ABORTED"), Some(BuildStatus::Aborted));
        // Anything outside the closed set is reported as absent.
        assert_eq!(BuildStatus::parse("UNSTABLE"), None);
        assert_eq!(BuildStatus::parse("success"), None);
    }

    #[test]
    fn build_params_preserve_server_order() {
        let build: Build = serde_json::from_value(json!({
            "number": 7,
            "timestamp": 1700000000000i64,
            "duration": 42000,
            "result": "SUCCESS",
            "actions": [
                {"_class": "hudson.model.ParametersAction",
                 "parameters": [
                    {"name": "ZED", "value": "z"},
                    {"name": "ALPHA", "value": 1}
                 ]},
                {"_class": "hudson.model.CauseAction"}
            ]
        }))
        .unwrap();
        let params = build.params();
        assert_eq!(params[0].0, "ZED");
        assert_eq!(params[1].0, "ALPHA");
        assert_eq!(build.status(), Some(BuildStatus::Success));
    }

    #[test]
    fn running_build_has_no_status() {
        let build: Build = serde_json::from_value(json!({
            "number": 8,
            "building": true,
            "result": null
        }))
        .unwrap();
        assert_eq!(build.status(), None);
    }
}
