// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Secret;

/// Fallback Jenkins base URL when neither config nor environment set one.
pub const DEFAULT_JENKINS_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub jenkins: JenkinsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Connection settings for the Jenkins server.
///
/// `username` and `token` may be left empty in config files and supplied via
/// the `JENKINS_USERNAME` / `JENKINS_TOKEN` environment variables instead;
/// a missing credential only becomes an error when a connection is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JenkinsConfig {
    /// Base URL of the Jenkins server, e.g. `https://ci.example.com`.
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub username: String,
    /// API token or password.  Never logged, never serialized in clear.
    #[serde(default)]
    pub token: Secret,
    /// Timeout applied to the authentication probe and to every request.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: String::new(),
            token: Secret::default(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory that receives the daily-rotated log files.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    /// Default level when `JENQ_LOG` is not set: "error" | "warn" | "info" |
    /// "debug" | "trace".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_JENKINS_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
