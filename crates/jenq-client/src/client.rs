use std::sync::Arc;

use async_trait::async_trait;
use jenq_config::JenkinsConfig;
use serde_json::Value;

use crate::{Build, ClientError, HttpJenkinsClient, JobDetails, JobSummary, ViewDetails, ViewSummary};

/// Every remote operation the façade needs from a Jenkins server.
///
/// Queries for missing entities return [`ClientError::NotFound`]; it is the
/// façade's job to turn that into a domain-level absence.  Implementations
/// must not retry.
#[async_trait]
pub trait JenkinsClient: Send + Sync {
    // ── Jobs ─────────────────────────────────────────────────────────────
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, ClientError>;
    async fn get_job(&self, name: &str) -> Result<JobDetails, ClientError>;
    async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), ClientError>;
    async fn copy_job(&self, name: &str, new_name: &str) -> Result<(), ClientError>;
    async fn rename_job(&self, name: &str, new_name: &str) -> Result<(), ClientError>;
    async fn delete_job(&self, name: &str) -> Result<(), ClientError>;
    /// Trigger a build; fire-and-forget, no build handle is returned.
    async fn build_job(
        &self,
        name: &str,
        params: Option<&[(String, Value)]>,
    ) -> Result<(), ClientError>;

    // ── Views ────────────────────────────────────────────────────────────
    async fn list_views(&self) -> Result<Vec<ViewSummary>, ClientError>;
    async fn get_view(&self, name: &str) -> Result<ViewDetails, ClientError>;
    async fn add_job_to_view(&self, view: &str, job: &str) -> Result<(), ClientError>;
    async fn remove_job_from_view(&self, view: &str, job: &str) -> Result<(), ClientError>;
    /// Job names from the authenticated user's personal ("my views")
    /// namespace.  Entries without a `name` field are skipped.
    async fn my_view_jobs(&self, view: &str) -> Result<Vec<String>, ClientError>;

    // ── Builds ───────────────────────────────────────────────────────────
    async fn get_build(&self, job: &str, number: u32) -> Result<Build, ClientError>;
    /// `Ok(None)` when the job exists but has never been built.
    async fn get_last_build(&self, job: &str) -> Result<Option<Build>, ClientError>;
    async fn stop_build(&self, job: &str, number: u32) -> Result<(), ClientError>;
    async fn console_text(&self, job: &str, number: u32) -> Result<String, ClientError>;
}

/// Produces one freshly authenticated client per façade construction.
///
/// This is the seam that keeps the original's "every invocation
/// re-authenticates" behaviour while letting tests substitute an in-memory
/// server: the HTTP factory probes the real server on every call, the test
/// factories hand back a shared mock.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn JenkinsClient>, ClientError>;
}

/// [`ClientFactory`] backed by [`HttpJenkinsClient::connect`].
pub struct HttpClientFactory {
    config: JenkinsConfig,
}

impl HttpClientFactory {
    pub fn new(config: JenkinsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientFactory for HttpClientFactory {
    async fn connect(&self) -> Result<Arc<dyn JenkinsClient>, ClientError> {
        let client = HttpJenkinsClient::connect(&self.config).await?;
        Ok(Arc::new(client))
    }
}
