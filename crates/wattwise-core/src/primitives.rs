//! # Innate Primitives
//!
//! Hardcoded constants for the Wattwise core.
//!
//! These values are compiled into the binary. The two policy constants may be
//! overridden through a [`Policy`](crate::Policy); everything else is fixed.

/// Energy consumption (kWh) above which a machine is flagged as inefficient.
///
/// The comparison is strict: exactly this value is still efficient.
pub const INEFFICIENCY_THRESHOLD_KWH: f64 = 500.0;

/// Electricity cost in currency units per kWh.
pub const ELECTRICITY_COST_PER_KWH: f64 = 0.10;

/// Number of fields in every machine record.
pub const FIELDS_PER_RECORD: usize = 3;

/// Decimal places kept after every calculation step.
pub const DECIMAL_PLACES: i32 = 2;

/// Column names shared by the CSV header and the JSON objects.
pub const FIELD_MACHINE_ID: &str = "machine_id";
pub const FIELD_POWER_USAGE_KW: &str = "power_usage_kw";
pub const FIELD_OPERATIONAL_HOURS: &str = "operational_hours";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum number of records in a single batch.
///
/// Batches longer than this are rejected by the parsers.
pub const MAX_RECORDS: usize = 10_000;
