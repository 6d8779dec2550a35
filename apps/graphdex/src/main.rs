//! # Graphdex - graph database index client
//!
//! ## Usage
//!
//! ```bash
//! graphdex create people --type fulltext --provider lucene
//! graphdex add people http://localhost:7474/db/data/node/42 name Bob
//! graphdex find people name Bob
//! graphdex query people 'name:B*' --json
//! graphdex --kind relationship list
//! ```

use clap::Parser;
use graphdex::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // GRAPHDEX_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GRAPHDEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graphdex=info,graphdex_core=info".into());

    // Logs go to stderr so stdout stays clean for command output.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
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

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
