//! Explain command - Show the warehouse SQL for a panel
//!
//! Prints the parameterized statement a warehouse-backed executor would run,
//! followed by its bind values. Nothing is executed.
//!
//! # Usage
//!
//! ```bash
//! egress explain --period daily --env PRD
//! egress explain --period hourly --env PRD --set direct --namespace SALES --format json
//! ```

use std::path::Path;

use anyhow::Result;
use clap::Args;
use egress_query::{OutputFormat, Statement};

use crate::cmd::{Runtime, SelectionArgs, parse_object_set};

/// Explain command arguments
#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Object set (base, underlying, direct)
    #[arg(short, long, default_value = "base")]
    pub set: String,

    /// Drill into one namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Run the explain command
pub fn run(args: ExplainArgs, config_path: Option<&Path>) -> Result<()> {
    let format: OutputFormat = args
        .format
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid format: {}", e))?;
    let object_set = parse_object_set(&args.set)?;

    let runtime = Runtime::load(config_path)?;
    let selection = args.selection.selection(&runtime.settings, object_set)?;
    let statement = runtime
        .engine()?
        .explain(&selection, args.namespace.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statement)?),
        OutputFormat::Table | OutputFormat::Csv => print!("{}", render_statement(&statement)),
    }

    Ok(())
}

/// SQL followed by one comment line per bind value
fn render_statement(statement: &Statement) -> String {
    let mut out = format!("{};\n", statement.sql);
    for (i, param) in statement.params.iter().enumerate() {
        out.push_str(&format!("-- ?{} = {}\n", i + 1, param));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_query::Param;

    #[test]
    fn test_render_statement() {
        let statement = Statement::new(
            "SELECT 1 FROM t WHERE env = ? AND user_name NOT IN (?)",
            vec![Param::from("PRD"), Param::from("O'Brien")],
        );

        assert_eq!(
            render_statement(&statement),
            "SELECT 1 FROM t WHERE env = ? AND user_name NOT IN (?);\n-- ?1 = 'PRD'\n-- ?2 = 'O''Brien'\n"
        );
    }
}
