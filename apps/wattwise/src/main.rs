//! # Wattwise - Machine Energy Efficiency Reports
//!
//! The main binary for Wattwise.
//!
//! This application provides:
//! - CLI interface for validation, single-machine assessment and reports
//! - Markdown and JSON report output
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               apps/wattwise (THE BINARY)             │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │   Config    │   │   Report   │  │
//! │  │   (clap)    │   │   (toml)    │   │ (markdown) │  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                  ┌────────────────┐                  │
//! │                  │ wattwise-core  │                  │
//! │                  │  (THE LOGIC)   │                  │
//! │                  └────────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! wattwise report -f machines.csv -o report.md
//! wattwise validate -f machines.json
//! wattwise assess --power 100 --hours 8
//! wattwise demo --json-mode
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wattwise::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. WATTWISE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("WATTWISE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "wattwise=debug,wattwise_core=debug"
    } else {
        "wattwise=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so reports on stdout stay clean.
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

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Wattwise startup banner.
fn print_banner() {
    eprintln!(
        r#"
  ┬ ┬┌─┐┌┬┐┌┬┐┬ ┬┬┌─┐┌─┐
  │││├─┤ │  │ ││││└─┐├┤
  └┴┘┴ ┴ ┴  ┴ └┴┘┴└─┘└─┘

  Machine Energy Efficiency Reports v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
