//! # Formats Module
//!
//! Parsing collaborators that turn raw text into [`MachineRecord`]s.
//!
//! - `csv_format`: header row `machine_id,power_usage_kw,operational_hours`
//! - `json_format`: `{"machines": [{...}, ...]}`
//!
//! Numeric coercion happens here and only here. Parsers reject malformed
//! rows (missing fields, non-numeric text) but accept out-of-range numbers,
//! which the Validator reports later.

mod csv_format;
mod json_format;

pub use csv_format::parse_csv;
pub use json_format::parse_json;

use crate::primitives::MAX_RECORDS;
use crate::{MachineRecord, WattwiseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick a format from a file extension, falling back to the content.
    ///
    /// Content starting with `{` (after whitespace) is JSON; anything else
    /// is treated as CSV.
    #[must_use]
    pub fn detect(extension: Option<&str>, content: &str) -> Self {
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("csv") => InputFormat::Csv,
            Some("json") => InputFormat::Json,
            _ if content.trim_start().starts_with('{') => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

impl FromStr for InputFormat {
    type Err = WattwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(WattwiseError::UnknownFormat(format!(
                "{}. Use: csv, json",
                other
            ))),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse `input` in the given format.
pub fn parse_records(input: &str, format: InputFormat) -> Result<Vec<MachineRecord>, WattwiseError> {
    match format {
        InputFormat::Csv => parse_csv(input),
        InputFormat::Json => parse_json(input),
    }
}

/// Reject batches above `MAX_RECORDS`.
fn check_record_count(count: usize) -> Result<(), WattwiseError> {
    if count > MAX_RECORDS {
        return Err(WattwiseError::TooManyRecords {
            count,
            max: MAX_RECORDS,
        });
    }
    Ok(())
}

/// Parse a numeric field from text.
fn parse_number(row: usize, field: &str, raw: &str) -> Result<f64, WattwiseError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| WattwiseError::MalformedRecord {
            row,
            reason: format!("{} is not a number: {:?}", field, raw),
        })
}

/// Build a record, attaching the row number to identifier errors.
fn build_record(
    row: usize,
    machine_id: String,
    power_usage_kw: f64,
    operational_hours: f64,
) -> Result<MachineRecord, WattwiseError> {
    MachineRecord::new(machine_id, power_usage_kw, operational_hours).map_err(|e| match e {
        WattwiseError::MalformedRecord { reason, .. } => {
            WattwiseError::MalformedRecord { row, reason }
        }
        other => other,
    })
}

// =============================================================================
// TESTS
// =============================================================================
