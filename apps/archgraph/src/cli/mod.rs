//! # Dash CLI Module
//!
//! Argument parsing and the single `execute` entry point.
//!
//! ```bash
//! dash example-components --out data.json 20
//! dash add-layout --data data.json grid-layout
//! dash --json-mode status --data data.json
//! ```

mod commands;

use crate::DashError;
use crate::config::DashConfig;
use crate::tools::{self, ToolReport};
use archgraph_core::MemoryStore;
use clap::Parser;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// dash - data-transform tools for the component graph
///
/// Loads a Graph Document, runs one tool against it and writes the result.
#[derive(Parser, Debug)]
#[command(name = "dash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to input JSON data file. Without it the tool starts from an empty graph.
    #[arg(long, env = "ARCHGRAPH_DATA")]
    pub data: Option<PathBuf>,

    /// Path to output JSON data file. Defaults to --data.
    #[arg(long, env = "ARCHGRAPH_OUT")]
    pub out: Option<PathBuf>,

    /// Path to a TOML configuration file (default: ./dash.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress banner output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long)]
    pub json_mode: bool,

    /// Tool to run
    pub tool: Option<String>,

    /// Arguments passed to the tool. Flags may appear anywhere on the line.
    pub args: Vec<String>,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), DashError> {
    let config = DashConfig::load(cli.config.as_deref()).await?;

    let Some(tool_name) = cli.tool.as_deref() else {
        return Err(DashError::Usage(format!(
            "No tool specified. Available tools:\n{}",
            tools::listing()
        )));
    };
    let tool = tools::find(tool_name)?;

    let data_path = cli.data.or_else(|| config.data.clone());
    let out_path = cli.out.or_else(|| config.out.clone()).or_else(|| data_path.clone());
    if tool.writes && out_path.is_none() {
        return Err(DashError::NoOutputPath);
    }

    let document = load_document(data_path.as_deref()).await?;
    let duplicates = document.duplicate_ids();
    if !duplicates.is_empty() {
        tracing::warn!("Document holds duplicate ids: {}", duplicates.join(", "));
    }
    let mut store = MemoryStore::from_document(document);

    tracing::info!("Running tool: {}", tool.name);
    let report = (tool.run)(&mut store, &cli.args, &config)?;
    print_report(&report, cli.json_mode);

    if let Some(out) = out_path.filter(|_| tool.writes) {
        save_document(&out, &store).await?;
        if !cli.json_mode {
            println!("Wrote data to: {}", out.display());
        }
    }

    Ok(())
}

fn print_report(report: &ToolReport, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.data).unwrap_or_default()
        );
        return;
    }

    println!("{}", report.summary);
    for line in &report.lines {
        println!("  {}", line);
    }
}

// =============================================================================
// TESTS
// =============================================================================
