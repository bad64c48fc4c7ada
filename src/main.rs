// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use jenq_client::HttpClientFactory;
use jenq_config::{Config, LogConfig};
use jenq_mcp::{build_mcp_registry, PromptRegistry, DEFAULT_TOOL_NAMES};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Subcommands that only print never need logging or a Jenkins connection.
    match &cli.command {
        Some(Commands::ShowConfig) => {
            let config = jenq_config::load(cli.config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        Some(Commands::Tools) => {
            for name in DEFAULT_TOOL_NAMES {
                println!("{name}");
            }
            return Ok(());
        }
        _ => {}
    }

    let config = jenq_config::load(cli.config.as_deref())?;
    let _log_guard = init_logging(&config.log, cli.verbose);

    let tools = match cli.command {
        Some(Commands::Serve { tools }) => tools,
        _ => None,
    };
    serve(config, tools.as_deref()).await
}

async fn serve(config: Config, tools: Option<&str>) -> anyhow::Result<()> {
    let factory = Arc::new(HttpClientFactory::new(config.jenkins.clone()));
    let registry = build_mcp_registry(factory, tools);
    tracing::info!(tools = registry.names().len(), "starting MCP stdio server");
    jenq_mcp::serve_stdio(Arc::new(registry), Arc::new(PromptRegistry::standard())).await
}

/// Initialize tracing with a stderr layer and a daily-rotated file layer.
///
/// stdout carries the MCP transport, so diagnostics go to stderr and to
/// `<log.dir>/jenq.log`.  The returned guard must stay alive for the life
/// of the process or buffered file output is lost.
fn init_logging(
    log: &LogConfig,
    verbosity: u8,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => log.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("JENQ_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let file = match std::fs::create_dir_all(&log.dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::RollingFileAppender::new(
                tracing_appender::rolling::Rotation::DAILY,
                &log.dir,
                "jenq.log",
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Some((fmt::layer().with_writer(writer).with_ansi(false), guard))
        }
        Err(e) => {
            eprintln!(
                "warning: cannot create log directory {}: {e}",
                log.dir.display()
            );
            None
        }
    };

    match file {
        Some((file_layer, guard)) => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(filter)
                .init();
            None
        }
    }
}
