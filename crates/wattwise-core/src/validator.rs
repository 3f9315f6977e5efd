//! # Validator Module
//!
//! Batch validation for machine records.
//!
//! - Structural check: record count, field count, required fields
//! - Type/value check: every power and hours value must be finite and > 0
//! - Invalid data is reported, never rejected

use crate::primitives::FIELDS_PER_RECORD;
use crate::types::{
    MachineRecord, Presence, RequiredFields, StructuralCheck, TypeChecks, ValidationResult,
};

/// The Validator produces a batch-scoped [`ValidationResult`].
///
/// It has no side effects and never fails.
pub struct Validator;

impl Validator {
    /// Structural check.
    ///
    /// Required fields are always present: a `MachineRecord` cannot be
    /// constructed without them.
    #[must_use]
    pub fn validate_structure(records: &[MachineRecord]) -> StructuralCheck {
        StructuralCheck {
            record_count: records.len(),
            fields_per_record: FIELDS_PER_RECORD,
            required_fields: RequiredFields {
                machine_id: Presence::Present,
                power_usage_kw: Presence::Present,
                operational_hours: Presence::Present,
            },
        }
    }

    /// Type/value check over the whole batch.
    ///
    /// Each field's verdict is the AND of every record's verdict, so a single
    /// bad record marks that field `Invalid` for the entire batch. The two
    /// fields are judged independently.
    #[must_use]
    pub fn validate_types(records: &[MachineRecord]) -> TypeChecks {
        records
            .iter()
            .map(TypeChecks::of_record)
            .fold(TypeChecks::all_valid(), TypeChecks::merge)
    }

    /// Run both checks.
    #[must_use]
    pub fn validate(records: &[MachineRecord]) -> ValidationResult {
        ValidationResult {
            structural: Self::validate_structure(records),
            type_checks: Self::validate_types(records),
        }
    }

    /// Records failing the type/value check, in input order.
    #[must_use]
    pub fn invalid_records(records: &[MachineRecord]) -> Vec<&MachineRecord> {
        records
            .iter()
            .filter(|record| !TypeChecks::of_record(record).is_valid())
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
