//! # wattwise-core
//!
//! The validation-and-calculation engine for Wattwise - THE LOGIC.
//!
//! Given a batch of per-machine power-usage records, this crate:
//! - validates the batch (structure, then field types and values)
//! - computes energy consumption for every machine
//! - flags machines above the inefficiency threshold and computes the
//!   recommended hours, energy savings and cost reduction for them
//!
//! ## Pipeline
//!
//! ```text
//! text ──formats──▶ MachineRecord ──Validator──▶ ValidationResult
//!                         │
//!                         └──Classifier/Calculator──▶ MachineMetrics ──▶ Analysis
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no async, no network, no file I/O
//! - Invalid values are reported, never silently fixed
//! - Every formula result is rounded to two decimals before reuse

// =============================================================================
// MODULES
// =============================================================================

pub mod analysis;
pub mod calculator;
pub mod classifier;
pub mod formats;
pub mod primitives;
pub mod types;
pub mod validator;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    EfficiencyStatus, FieldValidity, MachineMetrics, MachineRecord, Presence, Recommendation,
    RequiredFields, StructuralCheck, TypeChecks, ValidationResult, WattwiseError,
};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use analysis::{Analysis, FleetSummary, MachineAnalysis, MachineOutcome};
pub use calculator::{Calculator, Policy, round_to};
pub use classifier::Classifier;
pub use validator::Validator;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{InputFormat, parse_csv, parse_json, parse_records};
