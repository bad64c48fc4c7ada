// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! In-memory [`JenkinsClient`] for tests.
//!
//! [`MockJenkins`] models a small Jenkins server: named jobs with optional
//! parameter definitions and build histories, global views, and per-user
//! "my views".  Mutations behave like the real server (create fails on a
//! taken name, delete on a missing job is NotFound) and every stop/trigger
//! is recorded so tests can assert which remote calls were actually issued.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ClientFactory, JenkinsClient};
use crate::types::{
    Build, BuildAction, BuildParameter, BuildRef, DefaultParameterValue, JobDetails, JobProperty,
    JobSummary, ParameterDefinition, ViewDetails, ViewSummary,
};
use crate::ClientError;

#[derive(Clone)]
struct MockJob {
    name: String,
    params: Vec<(String, Value)>,
    builds: Vec<Build>,
    config_xml: String,
    in_queue: bool,
    color: Option<String>,
}

#[derive(Clone)]
struct MockView {
    name: String,
    jobs: Vec<String>,
}

#[derive(Default)]
struct MockState {
    jobs: Vec<MockJob>,
    views: Vec<MockView>,
    my_views: Vec<(String, Vec<String>)>,
    stopped: Vec<(String, u32)>,
    triggered: Vec<(String, Option<Vec<(String, Value)>>)>,
}

/// Scriptable in-memory Jenkins server.
#[derive(Default)]
pub struct MockJenkins {
    state: Mutex<MockState>,
}

impl MockJenkins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(self, name: &str) -> Self {
        self.push_job(MockJob {
            name: name.to_string(),
            params: Vec::new(),
            builds: Vec::new(),
            config_xml: crate::EMPTY_CONFIG_XML.to_string(),
            in_queue: false,
            color: Some("blue".to_string()),
        });
        self
    }

    /// Job with declared parameters and their default values.
    pub fn with_param_job(self, name: &str, params: &[(&str, Value)]) -> Self {
        self.push_job(MockJob {
            name: name.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            builds: Vec::new(),
            config_xml: crate::EMPTY_CONFIG_XML.to_string(),
            in_queue: false,
            color: Some("blue".to_string()),
        });
        self
    }

    pub fn with_queued_job(self, name: &str) -> Self {
        self.push_job(MockJob {
            name: name.to_string(),
            params: Vec::new(),
            builds: Vec::new(),
            config_xml: crate::EMPTY_CONFIG_XML.to_string(),
            in_queue: true,
            color: Some("blue".to_string()),
        });
        self
    }

    pub fn with_view(self, name: &str, jobs: &[&str]) -> Self {
        self.state.lock().unwrap().views.push(MockView {
            name: name.to_string(),
            jobs: jobs.iter().map(|j| j.to_string()).collect(),
        });
        self
    }

    pub fn with_my_view(self, name: &str, jobs: &[&str]) -> Self {
        self.state.lock().unwrap().my_views.push((
            name.to_string(),
            jobs.iter().map(|j| j.to_string()).collect(),
        ));
        self
    }

    /// Append a build to an existing job's history.
    pub fn with_build(self, job: &str, build: Build) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(j) = state.jobs.iter_mut().find(|j| j.name == job) {
                j.builds.push(build);
            }
        }
        self
    }

    fn push_job(&self, job: MockJob) {
        self.state.lock().unwrap().jobs.push(job);
    }

    /// `(job, build number)` pairs stop calls were issued for.
    pub fn stopped(&self) -> Vec<(String, u32)> {
        self.state.lock().unwrap().stopped.clone()
    }

    /// `(job, params)` pairs builds were triggered for.
    pub fn triggered(&self) -> Vec<(String, Option<Vec<(String, Value)>>)> {
        self.state.lock().unwrap().triggered.clone()
    }

    fn details(job: &MockJob) -> JobDetails {
        JobDetails {
            name: job.name.clone(),
            url: format!("http://mock/job/{}/", job.name),
            in_queue: job.in_queue,
            color: job.color.clone(),
            property: vec![JobProperty {
                parameter_definitions: job
                    .params
                    .iter()
                    .map(|(k, v)| ParameterDefinition {
                        name: k.clone(),
                        default_parameter_value: Some(DefaultParameterValue {
                            name: k.clone(),
                            value: v.clone(),
                        }),
                    })
                    .collect(),
            }],
            last_build: job.builds.last().map(|b| BuildRef { number: b.number }),
        }
    }
}

/// Build a [`Build`] document for mock histories.
pub fn make_build(
    number: u32,
    timestamp: i64,
    duration: i64,
    result: Option<&str>,
    params: &[(&str, Value)],
) -> Build {
    Build {
        number,
        timestamp,
        duration,
        result: result.map(str::to_string),
        building: result.is_none(),
        actions: vec![BuildAction {
            parameters: params
                .iter()
                .map(|(k, v)| BuildParameter {
                    name: k.to_string(),
                    value: v.clone(),
                })
                .collect(),
        }],
    }
}

#[async_trait]
impl JenkinsClient for MockJenkins {
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .jobs
            .iter()
            .map(|j| JobSummary {
                name: j.name.clone(),
                url: format!("http://mock/job/{}/", j.name),
            })
            .collect())
    }

    async fn get_job(&self, name: &str) -> Result<JobDetails, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .jobs
            .iter()
            .find(|j| j.name == name)
            .map(Self::details)
            .ok_or(ClientError::NotFound)
    }

    async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.jobs.iter().any(|j| j.name == name) {
            return Err(ClientError::Status {
                code: 400,
                body: format!("a job already exists with the name {name}"),
            });
        }
        state.jobs.push(MockJob {
            name: name.to_string(),
            params: Vec::new(),
            builds: Vec::new(),
            config_xml: config_xml.to_string(),
            in_queue: false,
            color: Some("notbuilt".to_string()),
        });
        Ok(())
    }

    async fn copy_job(&self, name: &str, new_name: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.jobs.iter().any(|j| j.name == new_name) {
            return Err(ClientError::Status {
                code: 400,
                body: format!("a job already exists with the name {new_name}"),
            });
        }
        let source = state
            .jobs
            .iter()
            .find(|j| j.name == name)
            .cloned()
            .ok_or(ClientError::NotFound)?;
        state.jobs.push(MockJob {
            name: new_name.to_string(),
            builds: Vec::new(),
            ..source
        });
        Ok(())
    }

    async fn rename_job(&self, name: &str, new_name: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .iter_mut()
            .find(|j| j.name == name)
            .ok_or(ClientError::NotFound)?;
        job.name = new_name.to_string();
        Ok(())
    }

    async fn delete_job(&self, name: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let before = state.jobs.len();
        state.jobs.retain(|j| j.name != name);
        if state.jobs.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }

    async fn build_job(
        &self,
        name: &str,
        params: Option<&[(String, Value)]>,
    ) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if !state.jobs.iter().any(|j| j.name == name) {
            return Err(ClientError::NotFound);
        }
        state
            .triggered
            .push((name.to_string(), params.map(|p| p.to_vec())));
        Ok(())
    }

    async fn list_views(&self) -> Result<Vec<ViewSummary>, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .views
            .iter()
            .map(|v| ViewSummary {
                name: v.name.clone(),
                url: format!("http://mock/view/{}/", v.name),
            })
            .collect())
    }

    async fn get_view(&self, name: &str) -> Result<ViewDetails, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .views
            .iter()
            .find(|v| v.name == name)
            .map(|v| ViewDetails {
                name: v.name.clone(),
                url: format!("http://mock/view/{}/", v.name),
                jobs: v
                    .jobs
                    .iter()
                    .map(|j| JobSummary {
                        name: j.clone(),
                        url: format!("http://mock/job/{j}/"),
                    })
                    .collect(),
            })
            .ok_or(ClientError::NotFound)
    }

    async fn add_job_to_view(&self, view: &str, job: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let view = state
            .views
            .iter_mut()
            .find(|v| v.name == view)
            .ok_or(ClientError::NotFound)?;
        if !view.jobs.iter().any(|j| j == job) {
            view.jobs.push(job.to_string());
        }
        Ok(())
    }

    async fn remove_job_from_view(&self, view: &str, job: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let view = state
            .views
            .iter_mut()
            .find(|v| v.name == view)
            .ok_or(ClientError::NotFound)?;
        view.jobs.retain(|j| j != job);
        Ok(())
    }

    async fn my_view_jobs(&self, view: &str) -> Result<Vec<String>, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .my_views
            .iter()
            .find(|(name, _)| name == view)
            .map(|(_, jobs)| jobs.clone())
            .ok_or(ClientError::NotFound)
    }

    async fn get_build(&self, job: &str, number: u32) -> Result<Build, ClientError> {
        let state = self.state.lock().unwrap();
        let job = state
            .jobs
            .iter()
            .find(|j| j.name == job)
            .ok_or(ClientError::NotFound)?;
        job.builds
            .iter()
            .find(|b| b.number == number)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn get_last_build(&self, job: &str) -> Result<Option<Build>, ClientError> {
        let state = self.state.lock().unwrap();
        let job = state
            .jobs
            .iter()
            .find(|j| j.name == job)
            .ok_or(ClientError::NotFound)?;
        Ok(job.builds.last().cloned())
    }

    async fn stop_build(&self, job: &str, number: u32) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if !state.jobs.iter().any(|j| j.name == job) {
            return Err(ClientError::NotFound);
        }
        state.stopped.push((job.to_string(), number));
        Ok(())
    }

    async fn console_text(&self, job: &str, number: u32) -> Result<String, ClientError> {
        let state = self.state.lock().unwrap();
        let job = state
            .jobs
            .iter()
            .find(|j| j.name == job)
            .ok_or(ClientError::NotFound)?;
        job.builds
            .iter()
            .find(|b| b.number == number)
            .map(|b| format!("console output of {} #{number}\n", job.name))
            .ok_or(ClientError::NotFound)
    }
}

/// A client whose every call fails with a transport-level fault.  Used to
/// verify that remote faults and not-found conditions are distinguishable
/// internally yet render identically at the tool boundary.
pub struct FailingJenkins;

impl FailingJenkins {
    fn fault<T>() -> Result<T, ClientError> {
        Err(ClientError::Status {
            code: 500,
            body: "internal server error".to_string(),
        })
    }
}

#[async_trait]
impl JenkinsClient for FailingJenkins {
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        Self::fault()
    }
    async fn get_job(&self, _name: &str) -> Result<JobDetails, ClientError> {
        Self::fault()
    }
    async fn create_job(&self, _name: &str, _config_xml: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn copy_job(&self, _name: &str, _new_name: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn rename_job(&self, _name: &str, _new_name: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn delete_job(&self, _name: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn build_job(
        &self,
        _name: &str,
        _params: Option<&[(String, Value)]>,
    ) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn list_views(&self) -> Result<Vec<ViewSummary>, ClientError> {
        Self::fault()
    }
    async fn get_view(&self, _name: &str) -> Result<ViewDetails, ClientError> {
        Self::fault()
    }
    async fn add_job_to_view(&self, _view: &str, _job: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn remove_job_from_view(&self, _view: &str, _job: &str) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn my_view_jobs(&self, _view: &str) -> Result<Vec<String>, ClientError> {
        Self::fault()
    }
    async fn get_build(&self, _job: &str, _number: u32) -> Result<Build, ClientError> {
        Self::fault()
    }
    async fn get_last_build(&self, _job: &str) -> Result<Option<Build>, ClientError> {
        Self::fault()
    }
    async fn stop_build(&self, _job: &str, _number: u32) -> Result<(), ClientError> {
        Self::fault()
    }
    async fn console_text(&self, _job: &str, _number: u32) -> Result<String, ClientError> {
        Self::fault()
    }
}

/// [`ClientFactory`] that always hands back the same shared client.
pub struct StaticFactory(pub Arc<dyn JenkinsClient>);

#[async_trait]
impl ClientFactory for StaticFactory {
    async fn connect(&self) -> Result<Arc<dyn JenkinsClient>, ClientError> {
        Ok(self.0.clone())
    }
}

/// [`ClientFactory`] whose connect always fails — the "dead handle" case
/// where authentication never succeeded.
pub struct FailingFactory;

#[async_trait]
impl ClientFactory for FailingFactory {
    async fn connect(&self) -> Result<Arc<dyn JenkinsClient>, ClientError> {
        Err(ClientError::Status {
            code: 401,
            body: "invalid credentials".to_string(),
        })
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let mock = MockJenkins::new();
        mock.create_job("x", crate::EMPTY_CONFIG_XML).await.unwrap();
        let names: Vec<String> = mock.list_jobs().await.unwrap().into_iter().map(|j| j.name).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[tokio::test]
    async fn create_taken_name_fails_like_the_server() {
        let mock = MockJenkins::new().with_job("x");
        let err = mock.create_job("x", "<project/>").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { code: 400, .. }));
    }

    #[tokio::test]
    async fn delete_missing_job_is_not_found() {
        let mock = MockJenkins::new();
        assert!(mock.delete_job("ghost").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn last_build_none_for_never_built_job() {
        let mock = MockJenkins::new().with_job("fresh");
        assert!(mock.get_last_build("fresh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn param_job_exposes_defaults() {
        let mock = MockJenkins::new().with_param_job("demo", &[("ENV", json!("staging"))]);
        let job = mock.get_job("demo").await.unwrap();
        assert_eq!(
            job.default_params(),
            vec![("ENV".to_string(), json!("staging"))]
        );
    }

    #[tokio::test]
    async fn stops_are_recorded() {
        let mock = MockJenkins::new()
            .with_job("j")
            .with_build("j", make_build(3, 0, 0, Some("SUCCESS"), &[]));
        mock.stop_build("j", 3).await.unwrap();
        assert_eq!(mock.stopped(), vec![("j".to_string(), 3)]);
    }
}
