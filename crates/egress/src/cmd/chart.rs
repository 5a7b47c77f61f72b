//! Chart command - Render one usage or drill-down panel
//!
//! # Usage
//!
//! ```bash
//! egress chart --period daily --env PRD
//! egress chart --period monthly --env PRD --set direct --format json
//! egress chart --period hourly --env TST --namespace SALES --format csv
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use egress_query::OutputFormat;

use crate::cmd::output::print_panel;
use crate::cmd::{Runtime, SelectionArgs, parse_object_set};

/// Chart command arguments
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Object set (base, underlying, direct)
    #[arg(short, long, default_value = "base")]
    pub set: String,

    /// Drill into one namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Run the chart command
pub async fn run(args: ChartArgs, config_path: Option<&Path>) -> Result<()> {
    let format: OutputFormat = args
        .format
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid format: {}", e))?;
    let object_set = parse_object_set(&args.set)?;

    let runtime = Runtime::load(config_path)?;
    let selection = args.selection.selection(&runtime.settings, object_set)?;
    let engine = runtime.engine()?;

    tracing::info!(
        period = %selection.period,
        environment = %selection.environment,
        object_set = %object_set,
        namespace = ?args.namespace,
        backend = engine.backend_name(),
        "rendering chart"
    );

    let start = Instant::now();
    let output = match &args.namespace {
        Some(namespace) => engine.drill_down(namespace, &selection).await,
        None => engine.usage(&selection).await,
    }
    .context("failed to evaluate panel")?;

    print_panel(&output, selection.period, format)?;

    // Print summary to stderr
    eprintln!(
        "\n{} categories x {} buckets in {}ms [{}]",
        output.pivot.categories.len(),
        output.pivot.rows.len(),
        start.elapsed().as_millis(),
        engine.backend_name()
    );

    Ok(())
}
