//! CSV input: one header row, then one machine per row.
//!
//! Columns are matched by header name, so their order is free and extra
//! columns are ignored. Cells are trimmed.

use super::{build_record, check_record_count, parse_number};
use crate::primitives::{FIELD_MACHINE_ID, FIELD_OPERATIONAL_HOURS, FIELD_POWER_USAGE_KW};
use crate::{MachineRecord, WattwiseError};

/// Parse CSV text into records.
///
/// Empty input yields an empty batch. Row numbers in errors count data
/// rows from 1, excluding the header.
pub fn parse_csv(input: &str) -> Result<Vec<MachineRecord>, WattwiseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| WattwiseError::Parse(format!("CSV header: {}", e)))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| WattwiseError::Parse(format!("CSV header is missing column '{}'", name)))
    };
    let id_col = column(FIELD_MACHINE_ID)?;
    let power_col = column(FIELD_POWER_USAGE_KW)?;
    let hours_col = column(FIELD_OPERATIONAL_HOURS)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        check_record_count(row)?;

        let fields = result.map_err(|e| WattwiseError::MalformedRecord {
            row,
            reason: e.to_string(),
        })?;

        let cell = |col: usize, name: &str| {
            fields.get(col).ok_or_else(|| WattwiseError::MalformedRecord {
                row,
                reason: format!("missing field {}", name),
            })
        };

        let machine_id = cell(id_col, FIELD_MACHINE_ID)?;
        let power = parse_number(row, FIELD_POWER_USAGE_KW, cell(power_col, FIELD_POWER_USAGE_KW)?)?;
        let hours = parse_number(
            row,
            FIELD_OPERATIONAL_HOURS,
            cell(hours_col, FIELD_OPERATIONAL_HOURS)?,
        )?;

        records.push(build_record(row, machine_id.to_string(), power, hours)?);
    }

    Ok(records)
}
