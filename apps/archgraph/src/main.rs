//! # dash
//!
//! Command-line data-transform tools for the component graph.
//!
//! ## Usage
//!
//! ```bash
//! # Generate sample data
//! dash example-components --out data/example.json
//!
//! # Add a grid layout to an existing file
//! dash add-layout --data data/example.json grid-layout
//!
//! # Inspect
//! dash status --data data/example.json
//! dash view --data data/example.json grid-layout
//! ```

use archgraph::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // ARCHGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("ARCHGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "archgraph=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        println!("dash v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
