//! # Core Type Definitions
//!
//! This module contains all core types for the Wattwise pipeline:
//! - The record model (`MachineRecord`)
//! - Validation results (`ValidationResult`, `Presence`, `FieldValidity`)
//! - Derived metrics (`MachineMetrics`, `Recommendation`, `EfficiencyStatus`)
//! - Error types (`WattwiseError`)
//!
//! ## Numeric Model
//!
//! Every quantity is an `f64`. Conversion from text happens once, in the
//! `formats` module; nothing downstream coerces types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// MACHINE RECORD
// =============================================================================

/// One machine's power-usage record.
///
/// Immutable once constructed. The identifier is guaranteed non-empty; the
/// numeric fields are NOT range-checked here so that out-of-range values
/// can reach the [`Validator`](crate::Validator) and be reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineRecord {
    machine_id: String,
    power_usage_kw: f64,
    operational_hours: f64,
}

impl MachineRecord {
    /// Create a new record.
    ///
    /// Returns `WattwiseError::MalformedRecord` (row 0) if the identifier is
    /// empty or whitespace only. Parsers attach the real row number.
    pub fn new(
        machine_id: impl Into<String>,
        power_usage_kw: f64,
        operational_hours: f64,
    ) -> Result<Self, WattwiseError> {
        let machine_id = machine_id.into().trim().to_string();
        if machine_id.is_empty() {
            return Err(WattwiseError::MalformedRecord {
                row: 0,
                reason: "machine_id is empty".to_string(),
            });
        }

        Ok(Self {
            machine_id,
            power_usage_kw,
            operational_hours,
        })
    }

    /// The machine identifier.
    #[must_use]
    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    /// Power draw in kilowatts.
    #[must_use]
    pub fn power_usage_kw(&self) -> f64 {
        self.power_usage_kw
    }

    /// Operational hours over the reporting period.
    #[must_use]
    pub fn operational_hours(&self) -> f64 {
        self.operational_hours
    }
}

// =============================================================================
// VALIDATION RESULT
// =============================================================================

/// Presence of a required field.
///
/// Records cannot be built without all three fields, so this is always
/// `Present`; it exists so the report states the check explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presence::Present => write!(f, "present"),
        }
    }
}

/// Batch-wide validity of one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValidity {
    Valid,
    Invalid,
}

impl FieldValidity {
    /// Validity of a single value: finite and strictly positive.
    #[must_use]
    pub fn of_value(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            FieldValidity::Valid
        } else {
            FieldValidity::Invalid
        }
    }

    /// Combine two verdicts. One `Invalid` poisons the result.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (FieldValidity::Valid, FieldValidity::Valid) => FieldValidity::Valid,
            _ => FieldValidity::Invalid,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self == FieldValidity::Valid
    }
}

impl fmt::Display for FieldValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValidity::Valid => write!(f, "validated"),
            FieldValidity::Invalid => write!(f, "not valid"),
        }
    }
}

/// Presence status of the three required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFields {
    pub machine_id: Presence,
    pub power_usage_kw: Presence,
    pub operational_hours: Presence,
}

/// Result of the structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCheck {
    /// Number of records in the batch.
    pub record_count: usize,
    /// Fields per record (always `FIELDS_PER_RECORD`).
    pub fields_per_record: usize,
    pub required_fields: RequiredFields,
}

/// Result of the type/value check, aggregated over the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChecks {
    pub power_usage_kw: FieldValidity,
    pub operational_hours: FieldValidity,
}

impl TypeChecks {
    /// The verdict for an empty batch.
    #[must_use]
    pub const fn all_valid() -> Self {
        Self {
            power_usage_kw: FieldValidity::Valid,
            operational_hours: FieldValidity::Valid,
        }
    }

    /// Verdict for one record.
    #[must_use]
    pub fn of_record(record: &MachineRecord) -> Self {
        Self {
            power_usage_kw: FieldValidity::of_value(record.power_usage_kw()),
            operational_hours: FieldValidity::of_value(record.operational_hours()),
        }
    }

    /// Field-wise AND of two verdicts.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            power_usage_kw: self.power_usage_kw.and(other.power_usage_kw),
            operational_hours: self.operational_hours.and(other.operational_hours),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.power_usage_kw.is_valid() && self.operational_hours.is_valid()
    }
}

/// Batch-scoped validation summary (one per dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub structural: StructuralCheck,
    pub type_checks: TypeChecks,
}

impl ValidationResult {
    /// True when every type check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.type_checks.is_valid()
    }

    /// Names of the fields whose batch verdict is `Invalid`.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.type_checks.power_usage_kw.is_valid() {
            fields.push("power_usage_kw");
        }
        if !self.type_checks.operational_hours.is_valid() {
            fields.push("operational_hours");
        }
        fields
    }
}

// =============================================================================
// METRICS
// =============================================================================

/// Terminal classification state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyStatus {
    /// Consumption at or below the threshold.
    Efficient,
    /// Consumption strictly above the threshold.
    Inefficient,
}

impl fmt::Display for EfficiencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyStatus::Efficient => write!(f, "Efficient"),
            EfficiencyStatus::Inefficient => write!(f, "Inefficient"),
        }
    }
}

/// Remediation figures for an inefficient machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Hours that would bring consumption down to the threshold.
    pub recommended_hours: f64,
    /// kWh saved by running the recommended hours.
    pub energy_savings_kwh: f64,
    /// Currency saved at the policy's electricity cost.
    pub cost_reduction: f64,
}

/// Metrics derived from one record. Computed fresh, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineMetrics {
    pub energy_consumption_kwh: f64,
    /// Present if and only if the machine is inefficient.
    pub recommendation: Option<Recommendation>,
}

impl MachineMetrics {
    /// Metrics for an efficient machine.
    #[must_use]
    pub const fn efficient(energy_consumption_kwh: f64) -> Self {
        Self {
            energy_consumption_kwh,
            recommendation: None,
        }
    }

    /// Metrics for an inefficient machine.
    #[must_use]
    pub const fn inefficient(energy_consumption_kwh: f64, recommendation: Recommendation) -> Self {
        Self {
            energy_consumption_kwh,
            recommendation: Some(recommendation),
        }
    }

    #[must_use]
    pub fn status(&self) -> EfficiencyStatus {
        if self.recommendation.is_some() {
            EfficiencyStatus::Inefficient
        } else {
            EfficiencyStatus::Efficient
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Wattwise system.
///
/// - Invalid values are not errors; the Validator reports them
/// - Use `Result<T, WattwiseError>` for fallible operations
/// - The core never panics
#[derive(Debug, Error)]
pub enum WattwiseError {
    /// An input record is missing a field or holds a non-numeric value.
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The input document itself could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested input format is not supported.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The batch exceeds the record limit.
    #[error("Record count {count} exceeds maximum allowed {max}")]
    TooManyRecords { count: usize, max: usize },

    /// A calculation was asked to work outside its domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The configuration is unreadable or out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_trims_identifier() {
        let record = MachineRecord::new("  M401 ", 95.0, 8.0).expect("record");
        assert_eq!(record.machine_id(), "M401");
        assert_eq!(record.power_usage_kw(), 95.0);
        assert_eq!(record.operational_hours(), 8.0);
    }

    #[test]
    fn record_rejects_blank_identifier() {
        let result = MachineRecord::new("   ", 95.0, 8.0);
        assert!(matches!(
            result,
            Err(WattwiseError::MalformedRecord { row: 0, .. })
        ));
    }

    #[test]
    fn record_keeps_out_of_range_values() {
        let record = MachineRecord::new("M1", -5.0, 0.0).expect("record");
        assert_eq!(record.power_usage_kw(), -5.0);
        assert_eq!(record.operational_hours(), 0.0);
    }

    #[test]
    fn field_validity_of_value() {
        assert_eq!(FieldValidity::of_value(0.01), FieldValidity::Valid);
        assert_eq!(FieldValidity::of_value(0.0), FieldValidity::Invalid);
        assert_eq!(FieldValidity::of_value(-1.0), FieldValidity::Invalid);
        assert_eq!(FieldValidity::of_value(f64::NAN), FieldValidity::Invalid);
        assert_eq!(FieldValidity::of_value(f64::INFINITY), FieldValidity::Invalid);
    }

    #[test]
    fn field_validity_display() {
        assert_eq!(FieldValidity::Valid.to_string(), "validated");
        assert_eq!(FieldValidity::Invalid.to_string(), "not valid");
        assert_eq!(Presence::Present.to_string(), "present");
    }

    #[test]
    fn invalid_poisons_merge() {
        let bad = TypeChecks {
            power_usage_kw: FieldValidity::Invalid,
            operational_hours: FieldValidity::Valid,
        };
        let merged = TypeChecks::all_valid().merge(bad).merge(TypeChecks::all_valid());
        assert_eq!(merged.power_usage_kw, FieldValidity::Invalid);
        assert_eq!(merged.operational_hours, FieldValidity::Valid);
        assert!(!merged.is_valid());
    }

    #[test]
    fn metrics_status_follows_recommendation() {
        assert_eq!(
            MachineMetrics::efficient(450.0).status(),
            EfficiencyStatus::Efficient
        );
        let rec = Recommendation {
            recommended_hours: 5.0,
            energy_savings_kwh: 300.0,
            cost_reduction: 30.0,
        };
        assert_eq!(
            MachineMetrics::inefficient(800.0, rec).status(),
            EfficiencyStatus::Inefficient
        );
    }
}
