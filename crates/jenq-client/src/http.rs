// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! reqwest implementation of [`JenkinsClient`] against the Jenkins JSON API.
//!
//! Authentication is HTTP basic with an API token on every request; Jenkins
//! exempts token-authenticated requests from CSRF crumbs, so none are
//! handled here.  All calls are blocking from the caller's perspective and
//! carry the fixed timeout from the configuration — there is no retry and
//! no cancellation of an in-flight request.

use async_trait::async_trait;
use jenq_config::{JenkinsConfig, Secret};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::client::JenkinsClient;
use crate::types::{Build, JobDetails, JobSummary, ViewDetails, ViewSummary};
use crate::ClientError;

/// Top-level `api/json` document, pruned to what jenq asks for via `tree`.
#[derive(Debug, Default, serde::Deserialize)]
struct ServerSummary {
    #[serde(default)]
    jobs: Vec<JobSummary>,
    #[serde(default)]
    views: Vec<ViewSummary>,
}

#[derive(Debug, serde::Deserialize)]
struct MyViewJobs {
    #[serde(default)]
    jobs: Vec<Value>,
}

pub struct HttpJenkinsClient {
    base_url: String,
    username: String,
    token: Secret,
    http: reqwest::Client,
}

impl HttpJenkinsClient {
    /// Build a client and probe the server once with the configured
    /// timeout.  Success logs a `[Auth]` welcome line; failure logs at
    /// error level and is returned to the factory, which surfaces it as a
    /// per-invocation failure.
    pub async fn connect(config: &JenkinsConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let client = Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token: config.token.clone(),
            http,
        };

        match client.get_json::<ServerSummary>("/api/json?tree=jobs[name]").await {
            Ok(_) => {
                info!(
                    "[Auth] Welcome {} login to Jenkins server {}.",
                    client.username, client.base_url
                );
                Ok(client)
            }
            Err(e) => {
                error!("[Auth] Failed to login to Jenkins server {}!", client.base_url);
                Err(e)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Percent-encode one path segment (job, view, and user names may
    /// contain spaces and other reserved characters).
    fn seg(name: &str) -> String {
        urlencoding::encode(name).into_owned()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(self.url(path))
            .basic_auth(&self.username, Some(self.token.expose()))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))
    }

    async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .get(self.url(path))
            .basic_auth(&self.username, Some(self.token.expose()))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.text().await?)
    }

    async fn post(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url(path))
            .basic_auth(&self.username, Some(self.token.expose()))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        // Jenkins answers some POSTs (rename, build) with a redirect; reqwest
        // follows those, so anything non-success left here is a real fault.
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl JenkinsClient for HttpJenkinsClient {
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError> {
        let summary: ServerSummary = self.get_json("/api/json?tree=jobs[name,url]").await?;
        Ok(summary.jobs)
    }

    async fn get_job(&self, name: &str) -> Result<JobDetails, ClientError> {
        self.get_json(&format!("/job/{}/api/json", Self::seg(name))).await
    }

    async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/createItem?name={}", Self::seg(name))))
            .basic_auth(&self.username, Some(self.token.expose()))
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(config_xml.to_string())
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn copy_job(&self, name: &str, new_name: &str) -> Result<(), ClientError> {
        self.post(&format!(
            "/createItem?name={}&mode=copy&from={}",
            Self::seg(new_name),
            Self::seg(name)
        ))
        .await
    }

    async fn rename_job(&self, name: &str, new_name: &str) -> Result<(), ClientError> {
        self.post(&format!(
            "/job/{}/doRename?newName={}",
            Self::seg(name),
            Self::seg(new_name)
        ))
        .await
    }

    async fn delete_job(&self, name: &str) -> Result<(), ClientError> {
        self.post(&format!("/job/{}/doDelete", Self::seg(name))).await
    }

    async fn build_job(
        &self,
        name: &str,
        params: Option<&[(String, Value)]>,
    ) -> Result<(), ClientError> {
        match params {
            None => self.post(&format!("/job/{}/build", Self::seg(name))).await,
            Some(params) => {
                let form: Vec<(String, String)> = params
                    .iter()
                    .map(|(k, v)| (k.clone(), value_to_form(v)))
                    .collect();
                debug!("[Job] triggering {name} with {} parameters", form.len());
                let resp = self
                    .http
                    .post(self.url(&format!("/job/{}/buildWithParameters", Self::seg(name))))
                    .basic_auth(&self.username, Some(self.token.expose()))
                    .form(&form)
                    .send()
                    .await?;
                Self::check(resp).await?;
                Ok(())
            }
        }
    }

    async fn list_views(&self) -> Result<Vec<ViewSummary>, ClientError> {
        let summary: ServerSummary = self.get_json("/api/json?tree=views[name,url]").await?;
        Ok(summary.views)
    }

    async fn get_view(&self, name: &str) -> Result<ViewDetails, ClientError> {
        self.get_json(&format!("/view/{}/api/json", Self::seg(name))).await
    }

    async fn add_job_to_view(&self, view: &str, job: &str) -> Result<(), ClientError> {
        self.post(&format!(
            "/view/{}/addJobToView?name={}",
            Self::seg(view),
            Self::seg(job)
        ))
        .await
    }

    async fn remove_job_from_view(&self, view: &str, job: &str) -> Result<(), ClientError> {
        self.post(&format!(
            "/view/{}/removeJobFromView?name={}",
            Self::seg(view),
            Self::seg(job)
        ))
        .await
    }

    async fn my_view_jobs(&self, view: &str) -> Result<Vec<String>, ClientError> {
        let doc: MyViewJobs = self
            .get_json(&format!(
                "/user/{}/my-views/view/{}/api/json",
                Self::seg(&self.username),
                Self::seg(view)
            ))
            .await?;
        // Entries without a name are tolerated and skipped.
        Ok(doc
            .jobs
            .iter()
            .filter_map(|j| j.get("name").and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    async fn get_build(&self, job: &str, number: u32) -> Result<Build, ClientError> {
        self.get_json(&format!("/job/{}/{number}/api/json", Self::seg(job))).await
    }

    async fn get_last_build(&self, job: &str) -> Result<Option<Build>, ClientError> {
        match self
            .get_json::<Build>(&format!("/job/{}/lastBuild/api/json", Self::seg(job)))
            .await
        {
            Ok(build) => Ok(Some(build)),
            // A job that has never run has no lastBuild endpoint.
            Err(ClientError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn stop_build(&self, job: &str, number: u32) -> Result<(), ClientError> {
        self.post(&format!("/job/{}/{number}/stop", Self::seg(job))).await
    }

    async fn console_text(&self, job: &str, number: u32) -> Result<String, ClientError> {
        self.get_text(&format!("/job/{}/{number}/consoleText", Self::seg(job))).await
    }
}

fn value_to_form(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(HttpJenkinsClient::seg("My Job"), "My%20Job");
        assert_eq!(HttpJenkinsClient::seg("a/b"), "a%2Fb");
        assert_eq!(HttpJenkinsClient::seg("plain"), "plain");
    }

    #[test]
    fn form_values_render_without_json_quoting_for_strings() {
        assert_eq!(value_to_form(&Value::String("staging".into())), "staging");
        assert_eq!(value_to_form(&serde_json::json!(42)), "42");
        assert_eq!(value_to_form(&serde_json::json!(true)), "true");
    }

    #[test]
    fn server_summary_tolerates_missing_sections() {
        let s: ServerSummary = serde_json::from_str(r#"{"jobs": [{"name": "a"}]}"#).unwrap();
        assert_eq!(s.jobs.len(), 1);
        assert!(s.views.is_empty());
    }

    #[test]
    fn my_view_entries_without_name_are_skipped() {
        let doc: MyViewJobs = serde_json::from_str(
            r#"{"jobs": [{"name": "demo"}, {"url": "http://x"}, {"name": "release"}]}"#,
        )
        .unwrap();
        let names: Vec<String> = doc
            .jobs
            .iter()
            .filter_map(|j| j.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(names, vec!["demo", "release"]);
    }
}
