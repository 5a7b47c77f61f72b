//! Namespaces command - List namespaces seen in the lookback window

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use egress_query::OutputFormat;

use crate::cmd::{Runtime, SelectionArgs, parse_object_set};

/// Namespaces command arguments
#[derive(Args, Debug)]
pub struct NamespacesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Object set (base, underlying, direct)
    #[arg(short, long, default_value = "base")]
    pub set: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Run the namespaces command
pub async fn run(args: NamespacesArgs, config_path: Option<&Path>) -> Result<()> {
    let format: OutputFormat = args
        .format
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid format: {}", e))?;
    let object_set = parse_object_set(&args.set)?;

    let runtime = Runtime::load(config_path)?;
    let selection = args.selection.selection(&runtime.settings, object_set)?;
    let engine = runtime.engine()?;

    let namespaces = engine
        .namespaces(&selection)
        .await
        .context("failed to discover namespaces")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&namespaces)?),
        OutputFormat::Table | OutputFormat::Csv => {
            for namespace in &namespaces {
                println!("{}", namespace);
            }
        }
    }

    Ok(())
}
