//! Egress - Data egress dashboards from warehouse access history
//!
//! # Usage
//!
//! ```bash
//! # Accesses per namespace over the last 31 days
//! egress chart --period daily --env PRD
//!
//! # Drill into one namespace, direct objects, as JSON
//! egress chart --period hourly --env PRD --set direct --namespace SALES --format json
//!
//! # All four dashboard panels
//! egress dashboard --period monthly --env PRD --underlying SALES
//!
//! # Warehouse SQL for a panel
//! egress explain --period daily --env PRD --namespace SALES
//! ```

mod cmd;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use egress_config::{Config, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Egress - Data egress dashboards from warehouse access history
#[derive(Parser, Debug)]
#[command(name = "egress")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one usage or drill-down chart
    Chart(cmd::chart::ChartArgs),

    /// Evaluate all four dashboard panels
    Dashboard(cmd::dashboard::DashboardArgs),

    /// List namespaces seen in the lookback window
    Namespaces(cmd::namespaces::NamespacesArgs),

    /// Show the warehouse SQL for a panel
    Explain(cmd::explain::ExplainArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (log_level, log_format) =
        resolve_logging(cli.log_level.as_deref(), cli.config.as_deref());
    init_logging(&log_level, log_format)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Chart(args) => cmd::chart::run(args, config_path).await,
        Command::Dashboard(args) => cmd::dashboard::run(args, config_path).await,
        Command::Namespaces(args) => cmd::namespaces::run(args, config_path).await,
        Command::Explain(args) => cmd::explain::run(args, config_path),
    }
}

/// Resolve log filter and format: CLI flag > config file > default "info"
fn resolve_logging(cli_level: Option<&str>, config_path: Option<&Path>) -> (String, LogFormat) {
    let log = config_path
        .filter(|path| path.exists())
        .and_then(|path| Config::from_file(path).ok())
        .map(|config| config.log)
        .unwrap_or_default();

    (log.directive(cli_level), log.format)
}

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr; stdout carries command output only.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let (console, json) = match format {
        LogFormat::Console => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(json)
        .with(filter)
        .init();

    Ok(())
}
