//! JSON input: an object with a `machines` array.
//!
//! Numeric fields may be JSON numbers or numeric strings. The identifier may
//! be a string or an integer.

use super::{build_record, check_record_count, parse_number};
use crate::primitives::{FIELD_MACHINE_ID, FIELD_OPERATIONAL_HOURS, FIELD_POWER_USAGE_KW};
use crate::{MachineRecord, WattwiseError};
use serde_json::Value;

/// Parse a JSON document into records.
///
/// Row numbers in errors are 1-based positions in the `machines` array.
pub fn parse_json(input: &str) -> Result<Vec<MachineRecord>, WattwiseError> {
    let document: Value =
        serde_json::from_str(input).map_err(|e| WattwiseError::Parse(format!("JSON: {}", e)))?;

    let machines = document["machines"]
        .as_array()
        .ok_or_else(|| WattwiseError::Parse("JSON document has no 'machines' array".to_string()))?;

    check_record_count(machines.len())?;

    machines
        .iter()
        .enumerate()
        .map(|(index, machine)| parse_machine(index + 1, machine))
        .collect()
}

fn parse_machine(row: usize, machine: &Value) -> Result<MachineRecord, WattwiseError> {
    if !machine.is_object() {
        return Err(WattwiseError::MalformedRecord {
            row,
            reason: "entry is not an object".to_string(),
        });
    }

    let machine_id = match &machine[FIELD_MACHINE_ID] {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(missing(row, FIELD_MACHINE_ID)),
        _ => {
            return Err(WattwiseError::MalformedRecord {
                row,
                reason: format!("{} must be a string or number", FIELD_MACHINE_ID),
            });
        }
    };

    let power = number_field(row, machine, FIELD_POWER_USAGE_KW)?;
    let hours = number_field(row, machine, FIELD_OPERATIONAL_HOURS)?;

    build_record(row, machine_id, power, hours)
}

fn number_field(row: usize, machine: &Value, field: &str) -> Result<f64, WattwiseError> {
    match &machine[field] {
        Value::Number(n) => n.as_f64().ok_or_else(|| WattwiseError::MalformedRecord {
            row,
            reason: format!("{} is out of range", field),
        }),
        Value::String(s) => parse_number(row, field, s),
        Value::Null => Err(missing(row, field)),
        other => Err(WattwiseError::MalformedRecord {
            row,
            reason: format!("{} is not a number: {}", field, other),
        }),
    }
}

fn missing(row: usize, field: &str) -> WattwiseError {
    WattwiseError::MalformedRecord {
        row,
        reason: format!("missing field {}", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_machines_array() {
        let input = r#"{
            "machines": [
                {"machine_id": "M401", "power_usage_kw": 95, "operational_hours": 8},
                {"machine_id": "M402", "power_usage_kw": 70.5, "operational_hours": 10}
            ]
        }"#;
        let records = parse_json(input).expect("parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].machine_id(), "M401");
        assert_eq!(records[0].power_usage_kw(), 95.0);
        assert_eq!(records[1].power_usage_kw(), 70.5);
        assert_eq!(records[1].operational_hours(), 10.0);
    }

    #[test]
    fn numeric_strings_and_integer_ids() {
        let input = r#"{"machines": [{"machine_id": 17, "power_usage_kw": "12.5", "operational_hours": " 4 "}]}"#;
        let records = parse_json(input).expect("parse");

        assert_eq!(records[0].machine_id(), "17");
        assert_eq!(records[0].power_usage_kw(), 12.5);
        assert_eq!(records[0].operational_hours(), 4.0);
    }

    #[test]
    fn missing_machines_array() {
        assert!(matches!(
            parse_json(r#"{"devices": []}"#),
            Err(WattwiseError::Parse(_))
        ));
        assert!(matches!(parse_json("not json"), Err(WattwiseError::Parse(_))));
    }

    #[test]
    fn missing_field_reports_row() {
        let input = r#"{"machines": [
            {"machine_id": "A", "power_usage_kw": 1, "operational_hours": 1},
            {"machine_id": "B", "power_usage_kw": 1}
        ]}"#;
        let err = parse_json(input).expect_err("missing hours");

        assert!(matches!(err, WattwiseError::MalformedRecord { row: 2, .. }));
        assert!(err.to_string().contains("operational_hours"));
    }

    #[test]
    fn boolean_value_is_malformed() {
        let input = r#"{"machines": [{"machine_id": "A", "power_usage_kw": true, "operational_hours": 1}]}"#;
        assert!(matches!(
            parse_json(input),
            Err(WattwiseError::MalformedRecord { row: 1, .. })
        ));
    }

    #[test]
    fn empty_machines_array() {
        assert!(parse_json(r#"{"machines": []}"#).expect("parse").is_empty());
    }
}
