//! Job operations: existence, lookup, search, and the CRUD/trigger mutators.

use jenq_client::{JobDetails, EMPTY_CONFIG_XML};
use regex::RegexBuilder;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{FacadeError, FacadeResult, NotFoundKind};
use crate::Jenkins;

impl Jenkins {
    /// Membership check against the server's global job list.  Never caches
    /// the answer.
    pub async fn job_exists(&self, name: &str) -> FacadeResult<bool> {
        let jobs = self.client.list_jobs().await.map_err(FacadeError::Remote)?;
        let exists = jobs.iter().any(|j| j.name == name);
        if exists {
            info!("[Job] {name} found in all jobs.");
        } else {
            warn!("[Job] {name} not found in all jobs.");
        }
        Ok(exists)
    }

    pub async fn get_job(&self, name: &str) -> FacadeResult<JobDetails> {
        if !self.job_exists(name).await? {
            error!("[Job] {name} does not exist.");
            return Err(FacadeError::not_found(NotFoundKind::Job, name));
        }
        self.client
            .get_job(name)
            .await
            .map_err(|e| FacadeError::classify(e, NotFoundKind::Job, name))
    }

    /// An absent job counts as "not queued or running", never as an error.
    pub async fn job_queued_or_running(&self, name: &str) -> FacadeResult<bool> {
        match self.get_job(name).await {
            Ok(job) => {
                let active = job.queued_or_running();
                if active {
                    info!("[Job] {name} is queued or running.");
                } else {
                    info!("[Job] {name} not queued or running.");
                }
                Ok(active)
            }
            Err(e) if e.is_not_found() => {
                info!("[Job] {name} not queued or running.");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Declared parameter names mapped to their default values, in the
    /// server's declaration order.
    pub async fn job_default_params(&self, name: &str) -> FacadeResult<Vec<(String, Value)>> {
        let job = self.get_job(name).await?;
        let params = job.default_params();
        info!("[Job] {name} default parameters retrieved {params:?}.");
        Ok(params)
    }

    pub async fn job_base_url(&self, name: &str) -> FacadeResult<String> {
        let job = self.get_job(name).await?;
        info!("[Job] {name} base URL retrieved: {}.", job.url);
        Ok(job.url)
    }

    /// Literal-substring search over job names.
    ///
    /// `pattern` is escaped before compilation, so regex metacharacters
    /// match themselves: searching `"a.b"` will not match `"axb"`.  With a
    /// view name the candidate set is the view's members — resolved through
    /// the global lookup first, then the my-views fallback; if neither
    /// resolves, the result is an empty list rather than an error.  Matches
    /// come back in the server's iteration order.
    pub async fn search_job(
        &self,
        pattern: &str,
        view: Option<&str>,
        case_sensitive: bool,
    ) -> FacadeResult<Vec<String>> {
        let candidates: Vec<String> = match view {
            Some(view_name) => {
                info!("[Job] Searching jobs with string {pattern:?} in view: {view_name}");
                match self.get_view(view_name).await {
                    Ok(v) => v.jobs.into_iter().map(|j| j.name).collect(),
                    Err(e) if e.is_not_found() => match self.jobs_from_view(view_name).await {
                        Ok(jobs) => jobs,
                        Err(e) if e.is_not_found() => return Ok(Vec::new()),
                        Err(e) => return Err(e),
                    },
                    Err(e) => return Err(e),
                }
            }
            None => {
                info!("[Job] Searching jobs with string {pattern:?} in all jobs.");
                self.client
                    .list_jobs()
                    .await
                    .map_err(FacadeError::Remote)?
                    .into_iter()
                    .map(|j| j.name)
                    .collect()
            }
        };

        let matcher = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| FacadeError::Malformed(e.to_string()))?;

        let matching: Vec<String> = candidates
            .into_iter()
            .filter(|name| matcher.is_match(name))
            .collect();

        if matching.is_empty() {
            info!("[Job] No matching jobs found.");
        } else {
            info!("[Job] Found {} matching jobs.", matching.len());
        }
        Ok(matching)
    }

    /// Create a job from the given configuration document, or from the
    /// built-in empty-job template when none is supplied.
    pub async fn create_job(
        &self,
        name: &str,
        config_xml: Option<&str>,
    ) -> FacadeResult<JobDetails> {
        let config = config_xml.unwrap_or(EMPTY_CONFIG_XML);
        if let Err(e) = self.client.create_job(name, config).await {
            error!("[Job] Failed to create job {name}: {e}");
            return Err(FacadeError::classify(e, NotFoundKind::Job, name));
        }
        info!("[Job] {name} created successfully.");
        self.client
            .get_job(name)
            .await
            .map_err(|e| FacadeError::classify(e, NotFoundKind::Job, name))
    }

    pub async fn clone_job(&self, name: &str, new_name: &str) -> FacadeResult<JobDetails> {
        if !self.job_exists(name).await? {
            return Err(FacadeError::not_found(NotFoundKind::Job, name));
        }
        if let Err(e) = self.client.copy_job(name, new_name).await {
            error!("[Job] Failed to clone job {name} to {new_name}: {e}");
            return Err(FacadeError::classify(e, NotFoundKind::Job, name));
        }
        info!("[Job] {name} cloned to {new_name}.");
        self.client
            .get_job(new_name)
            .await
            .map_err(|e| FacadeError::classify(e, NotFoundKind::Job, new_name))
    }

    pub async fn rename_job(&self, name: &str, new_name: &str) -> FacadeResult<JobDetails> {
        if !self.job_exists(name).await? {
            return Err(FacadeError::not_found(NotFoundKind::Job, name));
        }
        if let Err(e) = self.client.rename_job(name, new_name).await {
            error!("[Job] Failed to rename job {name} to {new_name}: {e}");
            return Err(FacadeError::classify(e, NotFoundKind::Job, name));
        }
        info!("[Job] {name} renamed to {new_name}.");
        self.client
            .get_job(new_name)
            .await
            .map_err(|e| FacadeError::classify(e, NotFoundKind::Job, new_name))
    }

    pub async fn delete_job(&self, name: &str) -> FacadeResult<()> {
        if !self.job_exists(name).await? {
            return Err(FacadeError::not_found(NotFoundKind::Job, name));
        }
        if let Err(e) = self.client.delete_job(name).await {
            error!("[Job] Failed to delete job {name}: {e}");
            return Err(FacadeError::classify(e, NotFoundKind::Job, name));
        }
        info!("[Job] {name} deleted successfully.");
        Ok(())
    }

    /// Trigger a build and return immediately; the build handle is not
    /// tracked.
    pub async fn build_job(
        &self,
        name: &str,
        params: Option<&[(String, Value)]>,
    ) -> FacadeResult<()> {
        if !self.job_exists(name).await? {
            return Err(FacadeError::not_found(NotFoundKind::Job, name));
        }
        if let Err(e) = self.client.build_job(name, params).await {
            error!("[Job] Failed to trigger build for job {name}: {e}");
            return Err(FacadeError::classify(e, NotFoundKind::Job, name));
        }
        info!("[Job] Build triggered for job {name}.");
        Ok(())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
