//! Integration tests for the CLI commands, config loading and report output.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;
use wattwise::cli::{Cli, Commands, build_report, cmd_report, load_records};
use wattwise::config::AppConfig;
use wattwise_core::WattwiseError;

const SAMPLE_CSV: &str = include_str!("../data/sample_machines.csv");

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn test_parse_report_command() {
    let cli = Cli::try_parse_from([
        "wattwise", "report", "-f", "machines.csv", "-t", "csv", "-o", "out.md",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Report {
            file,
            format,
            output,
        }) => {
            assert_eq!(file, PathBuf::from("machines.csv"));
            assert_eq!(format, "csv");
            assert_eq!(output, Some(PathBuf::from("out.md")));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_assess_accepts_negative_values() {
    let cli = Cli::try_parse_from([
        "wattwise", "--json-mode", "assess", "--power", "-5", "--hours", "8",
    ])
    .unwrap();

    assert!(cli.json_mode);
    match cli.command {
        Some(Commands::Assess {
            machine_id,
            power,
            hours,
        }) => {
            assert_eq!(machine_id, "adhoc");
            assert_eq!(power, -5.0);
            assert_eq!(hours, 8.0);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["wattwise", "-q"]).unwrap();
    assert!(cli.quiet);
    assert!(cli.command.is_none());
}

// =============================================================================
// INPUT LOADING
// =============================================================================

#[test]
fn test_load_csv_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "fleet.csv", SAMPLE_CSV);

    let records = load_records(&path, "auto").unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[1].machine_id(), "M008");
    assert_eq!(records[1].power_usage_kw(), 110.0);
}

#[test]
fn test_load_json_by_content() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "fleet.data",
        r#"{"machines": [{"machine_id": "M1", "power_usage_kw": 100, "operational_hours": 8}]}"#,
    );

    let records = load_records(&path, "auto").unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_load_unknown_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "fleet.csv", SAMPLE_CSV);

    let result = load_records(&path, "xml");
    assert!(matches!(result, Err(WattwiseError::UnknownFormat(_))));
}

#[test]
fn test_load_missing_file() {
    let result = load_records(std::path::Path::new("/nonexistent/fleet.csv"), "auto");
    assert!(matches!(result, Err(WattwiseError::IoError(_))));
}

// =============================================================================
// REPORTS
// =============================================================================

#[test]
fn test_report_written_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "fleet.csv", SAMPLE_CSV);
    let output = dir.path().join("report.md");

    cmd_report(&AppConfig::default(), false, &input, "auto", Some(&output)).unwrap();

    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("# Data Validation Report"));
    assert!(report.contains("- Number of machines: 6"));
    // M007: 75 kW x 8 h = 600 kWh -> 6.67 h, savings 99.75 kWh, $9.98
    assert!(report.contains(r"$75.0 \times 8.0 = 600.0$ kWh"));
    assert!(report.contains(
        "Reduce operational hours to 6.67 hours for an expected cost reduction of $9.98."
    ));
    // M008: 110 kW x 3 h = 330 kWh
    assert!(report.contains("Machine is operating efficiently (330.0 kWh ≤ 500 kWh)"));
}

#[test]
fn test_report_uses_configured_policy() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(
        &dir,
        "wattwise.toml",
        "[policy]\ninefficiency_threshold_kwh = 700.0\n\n[report]\ninclude_formulas = false\n",
    );
    let config = AppConfig::load(Some(&config_path)).unwrap();

    let records = wattwise_core::parse_csv(SAMPLE_CSV).unwrap();
    let report = build_report(&config, false, records).unwrap();

    assert!(!report.contains("# Formulas Used:"));
    // 600 kWh is now under the threshold
    assert!(report.contains("Machine is operating efficiently (600.0 kWh ≤ 700 kWh)"));
}

#[test]
fn test_json_report_is_structured() {
    let records = wattwise_core::parse_csv(SAMPLE_CSV).unwrap();
    let json = build_report(&AppConfig::default(), true, records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["validation"]["structural"]["record_count"], 6);
    assert_eq!(value["validation"]["type_checks"]["power_usage_kw"], "valid");
    assert_eq!(value["machines"][0]["record"]["machine_id"], "M007");
    assert_eq!(value["machines"][0]["outcome"], "assessed");
    assert_eq!(value["machines"][0]["energy_consumption_kwh"], 600.0);
    assert_eq!(
        value["machines"][0]["recommendation"]["recommended_hours"],
        6.67
    );
    assert!(value["machines"][1]["recommendation"].is_null());
    assert_eq!(value["summary"]["machines_evaluated"], 6);
}

#[test]
fn test_invalid_records_still_reported() {
    let csv = "machine_id,power_usage_kw,operational_hours\nM1,100,8\nM2,-5,8\n";
    let report = build_report(
        &AppConfig::default(),
        false,
        wattwise_core::parse_csv(csv).unwrap(),
    )
    .unwrap();

    assert!(report.contains("- power_usage_kw (positive number): not valid"));
    assert!(report.contains("## Machine M2"));
    assert!(report.contains("- Energy Consumption: -40.0 kWh"));
}
