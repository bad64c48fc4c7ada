//! View operations.
//!
//! Global views are resolved by membership in the server's view list, so
//! [`Jenkins::get_view`] and [`Jenkins::view_base_url`] only ever see
//! global views.  [`Jenkins::jobs_from_view`] additionally falls back to
//! the authenticated user's personal "my views" namespace.

use jenq_client::ViewDetails;
use tracing::{error, info, warn};

use crate::error::{FacadeError, FacadeResult, NotFoundKind};
use crate::Jenkins;

impl Jenkins {
    /// All globally visible view names, in server order.
    pub async fn views(&self) -> FacadeResult<Vec<String>> {
        info!("[View] Retrieving all views from Jenkins server.");
        let views = self.client.list_views().await.map_err(FacadeError::Remote)?;
        Ok(views.into_iter().map(|v| v.name).collect())
    }

    /// Resolve a *global* view; personal views are invisible here.
    pub async fn get_view(&self, name: &str) -> FacadeResult<ViewDetails> {
        let known = self.views().await?;
        if !known.iter().any(|v| v == name) {
            warn!("[View] {name} not found in all views.");
            return Err(FacadeError::not_found(NotFoundKind::View, name));
        }
        info!("[View] {name} found in all views.");
        self.client
            .get_view(name)
            .await
            .map_err(|e| FacadeError::classify(e, NotFoundKind::View, name))
    }

    /// Member job names of a global view, or of a personal view via the
    /// my-views fallback.  A resolvable but empty view yields an empty
    /// list; an unresolvable view yields `NotFound`.  The two are distinct.
    pub async fn jobs_from_view(&self, name: &str) -> FacadeResult<Vec<String>> {
        match self.get_view(name).await {
            Ok(view) => {
                info!("[View] Retrieved jobs from all views within {name}.");
                Ok(view.jobs.into_iter().map(|j| j.name).collect())
            }
            Err(e) if e.is_not_found() => match self.client.my_view_jobs(name).await {
                Ok(jobs) => {
                    info!("[View] Retrieved jobs from my-views within {name}.");
                    Ok(jobs)
                }
                Err(e) if e.is_not_found() => {
                    warn!("[View] {name} not found in my-views.");
                    Err(FacadeError::not_found(NotFoundKind::View, name))
                }
                Err(e) => {
                    error!("[View] Failed to get jobs from my-views within {name}: {e}");
                    Err(FacadeError::Remote(e))
                }
            },
            Err(e) => Err(e),
        }
    }

    pub async fn view_base_url(&self, name: &str) -> FacadeResult<String> {
        let view = self.get_view(name).await?;
        info!("[View] {name} base URL retrieved: {}.", view.url);
        Ok(view.url)
    }

    /// Both the (global) view and the job must exist before the mutation is
    /// issued.
    pub async fn add_job_to_view(&self, view: &str, job: &str) -> FacadeResult<()> {
        self.require_view_and_job(view, job, "added to").await?;
        self.client
            .add_job_to_view(view, job)
            .await
            .map_err(FacadeError::Remote)?;
        info!("[View] Job {job} added to view {view}.");
        Ok(())
    }

    pub async fn remove_job_from_view(&self, view: &str, job: &str) -> FacadeResult<()> {
        self.require_view_and_job(view, job, "removed from").await?;
        self.client
            .remove_job_from_view(view, job)
            .await
            .map_err(FacadeError::Remote)?;
        info!("[View] Job {job} removed from view {view}.");
        Ok(())
    }

    async fn require_view_and_job(&self, view: &str, job: &str, verb: &str) -> FacadeResult<()> {
        if let Err(e) = self.get_view(view).await {
            error!("[View] Job {job} not {verb} view {view}.");
            return Err(e);
        }
        if !self.job_exists(job).await? {
            error!("[View] Job {job} not {verb} view {view}.");
            return Err(FacadeError::not_found(NotFoundKind::Job, job));
        }
        Ok(())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
