//! # Wattwise CLI Module
//!
//! This module implements the CLI interface for Wattwise.
//!
//! ## Available Commands
//!
//! - `report` - Full efficiency report for a CSV or JSON dataset
//! - `validate` - Validation checklist only
//! - `assess` - Metrics for a single machine
//! - `demo` - Report for the bundled sample dataset

mod commands;

use crate::config::{AppConfig, resolve_config_path};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wattwise_core::WattwiseError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Wattwise - Machine Energy Efficiency Reports
///
/// Validates per-machine power-usage records, computes energy consumption,
/// and recommends reduced operating hours for inefficient machines.
#[derive(Parser, Debug)]
#[command(name = "wattwise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (falls back to WATTWISE_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the full efficiency report
    Report {
        /// Path to the input file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (auto, csv, json)
        #[arg(short = 't', long, default_value = "auto")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a dataset without computing metrics
    Validate {
        /// Path to the input file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (auto, csv, json)
        #[arg(short = 't', long, default_value = "auto")]
        format: String,
    },

    /// Compute metrics for a single machine
    Assess {
        /// Machine identifier
        #[arg(short, long, default_value = "adhoc")]
        machine_id: String,

        /// Power usage in kW
        #[arg(short, long, allow_negative_numbers = true)]
        power: f64,

        /// Operational hours
        #[arg(short = 'H', long, allow_negative_numbers = true)]
        hours: f64,
    },

    /// Run the report on the bundled sample dataset
    Demo {
        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), WattwiseError> {
    let config = AppConfig::load(resolve_config_path(cli.config).as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Report {
            file,
            format,
            output,
        }) => cmd_report(&config, json_mode, &file, &format, output.as_deref()),
        Some(Commands::Validate { file, format }) => {
            cmd_validate(json_mode, &file, &format)
        }
        Some(Commands::Assess {
            machine_id,
            power,
            hours,
        }) => cmd_assess(&config, json_mode, &machine_id, power, hours),
        Some(Commands::Demo { output }) => cmd_demo(&config, json_mode, output.as_deref()),
        None => {
            // No subcommand - run the demo by default
            cmd_demo(&config, json_mode, None)
        }
    }
}
