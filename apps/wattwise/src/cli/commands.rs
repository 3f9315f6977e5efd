//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::AppConfig;
use crate::report::{fmt_num, render_markdown, render_validation_report};
use std::path::{Path, PathBuf};
use wattwise_core::{
    Analysis, Classifier, InputFormat, MachineRecord, TypeChecks, Validator, WattwiseError,
    parse_records,
};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum file size for input datasets (10 MB).
const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Bundled example dataset used by `demo`.
pub const SAMPLE_MACHINES_JSON: &str = include_str!("../../data/sample_machines.json");

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), WattwiseError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| WattwiseError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(WattwiseError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, WattwiseError> {
    let canonical = path.canonicalize().map_err(|e| {
        WattwiseError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(WattwiseError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, WattwiseError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        WattwiseError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(WattwiseError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| WattwiseError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// INPUT / OUTPUT
// =============================================================================

/// Read and parse a dataset. `format` is `auto`, `csv` or `json`.
pub fn load_records(file: &Path, format: &str) -> Result<Vec<MachineRecord>, WattwiseError> {
    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_INPUT_FILE_SIZE)?;

    let contents = std::fs::read_to_string(&validated_path)
        .map_err(|e| WattwiseError::IoError(format!("Read file: {}", e)))?;

    let input_format = if format.eq_ignore_ascii_case("auto") {
        let extension = validated_path.extension().and_then(|e| e.to_str());
        InputFormat::detect(extension, &contents)
    } else {
        format.parse::<InputFormat>()?
    };

    tracing::info!("Reading {:?} (format: {})", validated_path, input_format);

    let records = parse_records(&contents, input_format)?;
    tracing::debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Write `text` to `output`, or print it.
fn emit(text: &str, output: Option<&Path>) -> Result<(), WattwiseError> {
    match output {
        Some(path) => {
            let validated_output = validate_output_path(path)?;
            std::fs::write(&validated_output, text)
                .map_err(|e| WattwiseError::IoError(format!("Write file: {}", e)))?;
            tracing::info!("Wrote {} bytes to {:?}", text.len(), validated_output);
            Ok(())
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, WattwiseError> {
    serde_json::to_string_pretty(value).map_err(|e| WattwiseError::SerializationError(e.to_string()))
}

/// Log every record that fails the type/value check.
fn log_invalid_records(records: &[MachineRecord]) {
    for record in Validator::invalid_records(records) {
        tracing::warn!(
            machine_id = record.machine_id(),
            power_usage_kw = record.power_usage_kw(),
            operational_hours = record.operational_hours(),
            "Record has non-positive or non-numeric values; processing as given"
        );
    }
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Build the report text for a set of records.
pub fn build_report(
    config: &AppConfig,
    json_mode: bool,
    records: Vec<MachineRecord>,
) -> Result<String, WattwiseError> {
    log_invalid_records(&records);

    let analysis = Analysis::run(records, config.policy);

    for machine in &analysis.machines {
        if let wattwise_core::MachineOutcome::Failed { reason } = &machine.outcome {
            tracing::warn!(
                machine_id = machine.record.machine_id(),
                "Machine not assessed: {}",
                reason
            );
        }
    }

    tracing::info!(
        "Analyzed {} machines: {} efficient, {} inefficient",
        analysis.summary.machines_evaluated,
        analysis.summary.efficient,
        analysis.summary.inefficient
    );

    if json_mode {
        to_json(&analysis)
    } else {
        Ok(render_markdown(&analysis, &config.report))
    }
}

/// Generate the full report for a dataset file.
pub fn cmd_report(
    config: &AppConfig,
    json_mode: bool,
    file: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<(), WattwiseError> {
    let records = load_records(file, format)?;
    let report = build_report(config, json_mode, records)?;
    emit(&report, output)
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Print the validation checklist for a dataset file.
pub fn cmd_validate(json_mode: bool, file: &Path, format: &str) -> Result<(), WattwiseError> {
    let records = load_records(file, format)?;
    log_invalid_records(&records);

    let validation = Validator::validate(&records);

    if json_mode {
        let invalid: Vec<_> = Validator::invalid_records(&records)
            .iter()
            .map(|r| r.machine_id().to_string())
            .collect();
        let output = serde_json::json!({
            "validation": validation,
            "valid": validation.is_valid(),
            "invalid_machines": invalid,
        });
        return emit(&to_json(&output)?, None);
    }

    emit(&render_validation_report(&validation), None)
}

// =============================================================================
// ASSESS COMMAND
// =============================================================================

/// Compute and print one machine's metrics.
pub fn cmd_assess(
    config: &AppConfig,
    json_mode: bool,
    machine_id: &str,
    power: f64,
    hours: f64,
) -> Result<(), WattwiseError> {
    let record = MachineRecord::new(machine_id, power, hours)?;
    let checks = TypeChecks::of_record(&record);
    if !checks.is_valid() {
        log_invalid_records(std::slice::from_ref(&record));
    }

    let metrics = Classifier::with_policy(config.policy).assess(&record)?;

    if json_mode {
        let output = serde_json::json!({
            "record": record,
            "type_checks": checks,
            "status": metrics.status(),
            "metrics": metrics,
        });
        return emit(&to_json(&output)?, None);
    }

    println!("Machine {}", record.machine_id());
    println!("{}", "=".repeat(8 + record.machine_id().len()));
    println!("Power Usage:        {} kW", fmt_num(record.power_usage_kw()));
    println!("Operational Hours:  {} hours", fmt_num(record.operational_hours()));
    println!("Energy Consumption: {} kWh", fmt_num(metrics.energy_consumption_kwh));
    println!("Status:             {}", metrics.status());

    if let Some(rec) = metrics.recommendation {
        println!();
        println!("Recommended Hours:  {} hours", fmt_num(rec.recommended_hours));
        println!("Energy Savings:     {} kWh", fmt_num(rec.energy_savings_kwh));
        println!("Cost Reduction:     ${}", fmt_num(rec.cost_reduction));
    }

    Ok(())
}

// =============================================================================
// DEMO COMMAND
// =============================================================================

/// Run the report on the bundled sample dataset.
pub fn cmd_demo(
    config: &AppConfig,
    json_mode: bool,
    output: Option<&Path>,
) -> Result<(), WattwiseError> {
    tracing::info!("Running report on the bundled sample dataset");

    let records = parse_records(SAMPLE_MACHINES_JSON, InputFormat::Json)?;
    let report = build_report(config, json_mode, records)?;
    emit(&report, output)
}

// =============================================================================
// TESTS
// =============================================================================
