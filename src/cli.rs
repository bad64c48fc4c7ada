// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jenq",
    about = "MCP server exposing Jenkins job, view and build management",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdio (the default when no subcommand is given)
    Serve {
        /// Comma-separated tool names to expose, or "all".
        /// Use 'jenq tools' to list valid names.
        #[arg(long, value_name = "NAMES")]
        tools: Option<String>,
    },
    /// Print the effective configuration (credentials redacted)
    ShowConfig,
    /// List the tool names available for 'jenq serve --tools'
    Tools,
}
