//! Build operations.
//!
//! Every projection takes an optional build number; `None` means the job's
//! most recent build.  A job that has never been built has no last build,
//! which surfaces as a build-level absence, not a job-level one.

use chrono::{DateTime, Local, TimeZone};
use jenq_client::{Build, BuildStatus};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{FacadeError, FacadeResult, NotFoundKind};
use crate::Jenkins;

impl Jenkins {
    /// Resolve a build of `job`: a specific number, or the last build when
    /// `number` is `None`.
    pub async fn get_build(&self, job: &str, number: Option<u32>) -> FacadeResult<Build> {
        // The job must resolve first so a missing job reads as a job
        // absence, not a build absence.
        self.get_job(job).await?;
        match number {
            Some(n) => {
                let build = self
                    .client
                    .get_build(job, n)
                    .await
                    .map_err(|e| {
                        FacadeError::classify(e, NotFoundKind::Build, format!("{job} #{n}"))
                    })?;
                info!("[Build] Retrieved build #{n} of job {job}.");
                Ok(build)
            }
            None => {
                let build = self
                    .client
                    .get_last_build(job)
                    .await
                    .map_err(FacadeError::Remote)?;
                match build {
                    Some(build) => {
                        info!("[Build] Retrieved last build #{} of job {job}.", build.number);
                        Ok(build)
                    }
                    None => {
                        warn!("[Build] Job {job} has no last build.");
                        Err(FacadeError::not_found(
                            NotFoundKind::Build,
                            format!("last build of {job}"),
                        ))
                    }
                }
            }
        }
    }

    pub async fn last_build_number(&self, job: &str) -> FacadeResult<u32> {
        let build = self.get_build(job, None).await?;
        info!("[Build] Last build number of job {job}: {}.", build.number);
        Ok(build.number)
    }

    /// Stop the job's most recent build.  Returns whether a stop was
    /// actually issued; a never-built job yields `false` and no remote
    /// stop call.
    pub async fn stop_last_build(&self, job: &str) -> FacadeResult<bool> {
        self.get_job(job).await?;
        let last = self
            .client
            .get_last_build(job)
            .await
            .map_err(FacadeError::Remote)?;
        let Some(build) = last else {
            warn!("[Build] Job {job} has no last build to stop.");
            return Ok(false);
        };
        self.client
            .stop_build(job, build.number)
            .await
            .map_err(FacadeError::Remote)?;
        info!("[Build] Stopped build #{} of job {job}.", build.number);
        Ok(true)
    }

    /// Local wall-clock start time of a build.
    pub async fn build_start_time(
        &self,
        job: &str,
        number: Option<u32>,
    ) -> FacadeResult<DateTime<Local>> {
        let build = self.get_build(job, number).await?;
        let start = Local
            .timestamp_millis_opt(build.timestamp)
            .single()
            .ok_or_else(|| {
                error!(
                    "[Build] Build #{} of job {job} has an out-of-range timestamp {}.",
                    build.number, build.timestamp
                );
                FacadeError::Malformed(format!("timestamp {} out of range", build.timestamp))
            })?;
        info!("[Build] Build #{} of job {job} started at {start}.", build.number);
        Ok(start)
    }

    /// Duration of a build in milliseconds.
    pub async fn build_duration(&self, job: &str, number: Option<u32>) -> FacadeResult<i64> {
        let build = self.get_build(job, number).await?;
        info!(
            "[Build] Build #{} of job {job} took {} ms.",
            build.number, build.duration
        );
        Ok(build.duration)
    }

    /// Terminal status of a build.  `None` for a build that is still
    /// running or reported an outcome outside the recognized set.
    pub async fn build_status(
        &self,
        job: &str,
        number: Option<u32>,
    ) -> FacadeResult<Option<BuildStatus>> {
        let build = self.get_build(job, number).await?;
        match build.status() {
            Some(status) => {
                info!("[Build] Build #{} of job {job} status: {status}.", build.number)
            }
            None => info!("[Build] Build #{} of job {job} has no status yet.", build.number),
        }
        Ok(build.status())
    }

    /// Parameters the build actually ran with, in server order.
    pub async fn build_params(
        &self,
        job: &str,
        number: Option<u32>,
    ) -> FacadeResult<Vec<(String, Value)>> {
        let build = self.get_build(job, number).await?;
        info!("[Build] Retrieved parameters of build #{} of job {job}.", build.number);
        Ok(build.params())
    }

    /// Full console text of a build.
    pub async fn build_console(&self, job: &str, number: Option<u32>) -> FacadeResult<String> {
        let build = self.get_build(job, number).await?;
        let text = self
            .client
            .console_text(job, build.number)
            .await
            .map_err(|e| {
                error!(
                    "[Build] Failed to get console output of build #{} of job {job}: {e}",
                    build.number
                );
                FacadeError::classify(e, NotFoundKind::Build, format!("{job} #{}", build.number))
            })?;
        info!("[Build] Retrieved console output of build #{} of job {job}.", build.number);
        Ok(text)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
