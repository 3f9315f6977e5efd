//! # Analysis
//!
//! The batch pipeline: validate the dataset, classify every record, and
//! summarize the fleet.
//!
//! Validation never gates the analysis. Records with out-of-range values are
//! processed as given, and a record whose metrics cannot be computed becomes
//! a [`MachineOutcome::Failed`] entry without aborting the batch.

use crate::calculator::{Policy, round_to};
use crate::classifier::Classifier;
use crate::primitives::DECIMAL_PLACES;
use crate::types::{EfficiencyStatus, MachineMetrics, MachineRecord, ValidationResult};
use crate::validator::Validator;
use serde::Serialize;

/// Result of processing one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MachineOutcome {
    /// Metrics were computed.
    Assessed(MachineMetrics),
    /// The record could not be assessed.
    Failed { reason: String },
}

impl MachineOutcome {
    /// Metrics, if the record was assessed.
    #[must_use]
    pub fn metrics(&self) -> Option<&MachineMetrics> {
        match self {
            MachineOutcome::Assessed(metrics) => Some(metrics),
            MachineOutcome::Failed { .. } => None,
        }
    }
}

/// One record and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineAnalysis {
    pub record: MachineRecord,
    #[serde(flatten)]
    pub outcome: MachineOutcome,
}

/// Totals across every assessed machine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FleetSummary {
    pub machines_evaluated: usize,
    pub efficient: usize,
    pub inefficient: usize,
    pub failed: usize,
    pub total_consumption_kwh: f64,
    pub total_savings_kwh: f64,
    pub total_cost_reduction: f64,
}

impl FleetSummary {
    /// Summarize machine outcomes. Totals are rounded once at the end.
    #[must_use]
    pub fn from_machines(machines: &[MachineAnalysis]) -> Self {
        let raw = machines
            .iter()
            .fold(Self::default(), |acc, machine| acc.with_outcome(&machine.outcome));

        Self {
            total_consumption_kwh: round_to(raw.total_consumption_kwh, DECIMAL_PLACES),
            total_savings_kwh: round_to(raw.total_savings_kwh, DECIMAL_PLACES),
            total_cost_reduction: round_to(raw.total_cost_reduction, DECIMAL_PLACES),
            ..raw
        }
    }

    fn with_outcome(self, outcome: &MachineOutcome) -> Self {
        let evaluated = Self {
            machines_evaluated: self.machines_evaluated + 1,
            ..self
        };

        let Some(metrics) = outcome.metrics() else {
            return Self {
                failed: evaluated.failed + 1,
                ..evaluated
            };
        };

        let consumed = Self {
            total_consumption_kwh: evaluated.total_consumption_kwh + metrics.energy_consumption_kwh,
            ..evaluated
        };

        match metrics.recommendation {
            None => Self {
                efficient: consumed.efficient + 1,
                ..consumed
            },
            Some(rec) => Self {
                inefficient: consumed.inefficient + 1,
                total_savings_kwh: consumed.total_savings_kwh + rec.energy_savings_kwh,
                total_cost_reduction: consumed.total_cost_reduction + rec.cost_reduction,
                ..consumed
            },
        }
    }
}

/// Complete analysis of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub validation: ValidationResult,
    pub policy: Policy,
    /// Per-machine results in input order.
    pub machines: Vec<MachineAnalysis>,
    pub summary: FleetSummary,
}

impl Analysis {
    /// Run the pipeline over `records`.
    #[must_use]
    pub fn run(records: Vec<MachineRecord>, policy: Policy) -> Self {
        let validation = Validator::validate(&records);
        let classifier = Classifier::with_policy(policy);

        let machines: Vec<MachineAnalysis> = records
            .into_iter()
            .map(|record| {
                let outcome = match classifier.assess(&record) {
                    Ok(metrics) => MachineOutcome::Assessed(metrics),
                    Err(e) => MachineOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
                MachineAnalysis { record, outcome }
            })
            .collect();

        let summary = FleetSummary::from_machines(&machines);

        Self {
            validation,
            policy,
            machines,
            summary,
        }
    }

    /// Machines with the given status, in input order.
    pub fn with_status(
        &self,
        status: EfficiencyStatus,
    ) -> impl Iterator<Item = &MachineAnalysis> + '_ {
        self.machines.iter().filter(move |machine| {
            machine
                .outcome
                .metrics()
                .is_some_and(|metrics| metrics.status() == status)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
