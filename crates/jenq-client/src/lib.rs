// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! `jenq-client` — typed client for the Jenkins JSON API.
//!
//! The crate has three layers:
//!
//! - [`types`]: serde models for the `api/json` documents jenq consumes
//!   (jobs, views, builds, parameter definitions).
//! - [`JenkinsClient`]: the trait describing every remote operation the
//!   façade needs.  [`HttpJenkinsClient`] implements it over reqwest with
//!   HTTP basic auth; [`mock::MockJenkins`] implements it in memory for
//!   tests.
//! - [`ClientFactory`]: one fresh authenticated client per façade
//!   construction.  There is no pooling, retry, or reconnect anywhere in
//!   this crate — a connect failure simply makes that invocation fail.

mod client;
mod error;
mod http;
pub mod mock;
mod types;

pub use client::{ClientFactory, HttpClientFactory, JenkinsClient};
pub use error::ClientError;
pub use http::HttpJenkinsClient;
pub use types::{
    Build, BuildAction, BuildParameter, BuildRef, BuildStatus, DefaultParameterValue, JobDetails,
    JobProperty, JobSummary, ParameterDefinition, ViewDetails, ViewSummary, EMPTY_CONFIG_XML,
};
