// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
mod loader;
mod schema;
mod secret;

pub use loader::load;
pub use schema::{Config, JenkinsConfig, LogConfig, DEFAULT_JENKINS_URL};
pub use secret::Secret;
