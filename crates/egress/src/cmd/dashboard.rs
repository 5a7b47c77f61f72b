//! Dashboard command - Evaluate all four panels
//!
//! Prints one JSON document. A panel that fails carries its error instead of
//! a chart; the other panels are still shown.
//!
//! # Usage
//!
//! ```bash
//! egress dashboard --period monthly --env PRD
//! egress dashboard --period daily --env PRD --underlying SALES --direct MART
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use egress_analytics::{Dashboard, DrillTargets};
use egress_query::ObjectSet;

use crate::cmd::{Runtime, SelectionArgs};

/// Dashboard command arguments
#[derive(Args, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Namespace for the underlying drill-down (default: first namespace)
    #[arg(short, long)]
    pub underlying: Option<String>,

    /// Namespace for the direct drill-down (default: first namespace)
    #[arg(short, long)]
    pub direct: Option<String>,
}

/// Run the dashboard command
pub async fn run(args: DashboardArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = Runtime::load(config_path)?;
    let selection = args.selection.selection(&runtime.settings, ObjectSet::Base)?;
    let engine = runtime.engine()?;

    tracing::info!(
        period = %selection.period,
        environment = %selection.environment,
        backend = engine.backend_name(),
        "loading dashboard"
    );

    let drill = DrillTargets {
        underlying: args.underlying,
        direct: args.direct,
    };
    let dashboard = Dashboard::load(&engine, &selection, drill)
        .await
        .context("failed to load dashboard")?;

    for (slot, panel) in dashboard.panels() {
        if let Some(Err(e)) = panel {
            tracing::warn!(panel = slot, error = %e, "panel failed");
        }
    }

    println!("{}", serde_json::to_string_pretty(&dashboard.to_json())?);
    Ok(())
}
