//! # Leadbook
//!
//! Lead tracking for real-estate promoters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/leadbook (THE BINARY)            │
//! │                                                      │
//! │   ┌─────────────┐   ┌──────────────┐   ┌──────────┐  │
//! │   │    CLI      │   │   Config     │   │  stdin   │  │
//! │   │   (clap)    │   │   (toml)     │   │ prompts  │  │
//! │   └──────┬──────┘   └──────┬───────┘   └────┬─────┘  │
//! │          └─────────────────┼────────────────┘        │
//! │                            ▼                         │
//! │                  ┌──────────────────┐                │
//! │                  │  leadbook-core   │                │
//! │                  │   (THE LOGIC)    │                │
//! │                  └──────────────────┘                │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! leadbook list
//! leadbook add -n "Ana García" -p "+52 686 111 1111" -i Compra
//! leadbook schedule C-001 tomorrow
//! leadbook note C-001 "Le interesa Modelo Olivo"
//! leadbook --backend redb --data ./data status
//! ```

use clap::Parser;
use leadbook::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // LEADBOOK_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr so `--json-mode` output stays clean.
    let log_format = std::env::var("LEADBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "leadbook=debug,leadbook_core=debug"
    } else {
        "leadbook=warn,leadbook_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

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

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
