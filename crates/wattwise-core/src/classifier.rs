//! # Classifier
//!
//! Per-record efficiency classification.
//!
//! Two terminal states, selected by a strict comparison against the policy
//! threshold:
//!
//! | Consumption | Status | Metrics computed |
//! |-------------|--------|------------------|
//! | `<= threshold` | Efficient | consumption only |
//! | `> threshold` | Inefficient | consumption, recommended hours, savings, cost reduction |

use crate::WattwiseError;
use crate::calculator::{Calculator, Policy};
use crate::types::{EfficiencyStatus, MachineMetrics, MachineRecord, Recommendation};

/// Classifier bound to a [`Calculator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    calculator: Calculator,
}

impl Classifier {
    /// Create a classifier with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom policy.
    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            calculator: Calculator::with_policy(policy),
        }
    }

    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Classify a consumption figure. Total and deterministic.
    #[must_use]
    pub fn classify(&self, consumption_kwh: f64) -> EfficiencyStatus {
        if consumption_kwh > self.calculator.policy().inefficiency_threshold_kwh {
            EfficiencyStatus::Inefficient
        } else {
            EfficiencyStatus::Efficient
        }
    }

    /// Compute the metrics a record's classification calls for.
    ///
    /// Fails only when an inefficient record has a power draw the
    /// recommendation formula cannot divide by (e.g. negative power and
    /// negative hours).
    pub fn assess(&self, record: &MachineRecord) -> Result<MachineMetrics, WattwiseError> {
        let calc = &self.calculator;
        let power = record.power_usage_kw();
        let consumption = calc.energy_consumption(power, record.operational_hours());

        match self.classify(consumption) {
            EfficiencyStatus::Efficient => Ok(MachineMetrics::efficient(consumption)),
            EfficiencyStatus::Inefficient => {
                let recommended_hours = calc.recommended_hours(power)?;
                let energy_savings_kwh = calc.energy_savings(consumption, power, recommended_hours);
                let cost_reduction = calc.cost_reduction(energy_savings_kwh);

                Ok(MachineMetrics::inefficient(
                    consumption,
                    Recommendation {
                        recommended_hours,
                        energy_savings_kwh,
                        cost_reduction,
                    },
                ))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(power: f64, hours: f64) -> MachineRecord {
        MachineRecord::new("M-test", power, hours).expect("record")
    }

    #[test]
    fn threshold_boundary() {
        let classifier = Classifier::new();
        assert_eq!(classifier.classify(500.0), EfficiencyStatus::Efficient);
        assert_eq!(classifier.classify(500.01), EfficiencyStatus::Inefficient);
        assert_eq!(classifier.classify(0.0), EfficiencyStatus::Efficient);
    }

    #[test]
    fn efficient_record_has_no_recommendation() {
        let metrics = Classifier::new().assess(&record(50.0, 9.0)).expect("assess");

        assert_eq!(metrics.energy_consumption_kwh, 450.0);
        assert_eq!(metrics.status(), EfficiencyStatus::Efficient);
        assert!(metrics.recommendation.is_none());
    }

    #[test]
    fn inefficient_record_gets_all_metrics() {
        let metrics = Classifier::new().assess(&record(100.0, 8.0)).expect("assess");

        assert_eq!(metrics.energy_consumption_kwh, 800.0);
        assert_eq!(metrics.status(), EfficiencyStatus::Inefficient);
        let rec = metrics.recommendation.expect("recommendation");
        assert_eq!(rec.recommended_hours, 5.0);
        assert_eq!(rec.energy_savings_kwh, 300.0);
        assert_eq!(rec.cost_reduction, 30.0);
    }

    #[test]
    fn exactly_at_threshold_is_efficient() {
        let metrics = Classifier::new().assess(&record(100.0, 5.0)).expect("assess");
        assert_eq!(metrics.status(), EfficiencyStatus::Efficient);
    }

    #[test]
    fn negative_power_below_threshold_is_efficient() {
        let metrics = Classifier::new().assess(&record(-5.0, 8.0)).expect("assess");
        assert_eq!(metrics.energy_consumption_kwh, -40.0);
        assert_eq!(metrics.status(), EfficiencyStatus::Efficient);
    }

    #[test]
    fn negative_power_above_threshold_is_domain_error() {
        let result = Classifier::new().assess(&record(-100.0, -8.0));
        assert!(matches!(result, Err(WattwiseError::Domain(_))));
    }

    #[test]
    fn custom_threshold() {
        let classifier = Classifier::with_policy(Policy {
            inefficiency_threshold_kwh: 1000.0,
            ..Policy::default()
        });
        assert_eq!(classifier.classify(800.0), EfficiencyStatus::Efficient);
    }
}
