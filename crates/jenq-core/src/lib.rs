// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! `jenq-core` — the Job/View/Build façade.
//!
//! [`Jenkins`] maps the fixed vocabulary of jenq operations onto calls
//! against a [`JenkinsClient`], adding the uniform existence checks and
//! `[Job]` / `[View]` / `[Build]` log lines that the tool layer relies on.
//! The façade is the single boundary that converts remote faults into
//! [`FacadeError`]; nothing above it ever sees a transport error directly.
//!
//! Absence and fault stay distinguishable here — [`FacadeError::NotFound`]
//! versus [`FacadeError::Remote`] — even though the tool layer renders both
//! as the same "Failed to …" text.
//!
//! The façade holds no state beyond the injected client and never caches:
//! every operation that needs a job re-checks its existence against the
//! server.

mod build;
mod error;
mod job;
mod view;

use std::sync::Arc;

use jenq_client::JenkinsClient;

pub use error::{FacadeError, FacadeResult, NotFoundKind};

/// The command-and-query façade over one authenticated Jenkins connection.
pub struct Jenkins {
    client: Arc<dyn JenkinsClient>,
}

impl Jenkins {
    pub fn new(client: Arc<dyn JenkinsClient>) -> Self {
        Self { client }
    }
}
