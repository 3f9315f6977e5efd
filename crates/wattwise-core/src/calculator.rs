//! # Metrics Calculator
//!
//! Pure, stateless energy formulas.
//!
//! | Metric | Formula |
//! |--------|---------|
//! | Energy consumption (kWh) | `power_kw * hours` |
//! | Recommended hours | `threshold / power_kw` |
//! | Energy savings (kWh) | `consumption - power_kw * recommended_hours` |
//! | Cost reduction | `savings * cost_per_kwh` |
//!
//! ## Rounding
//!
//! Every result is rounded to [`DECIMAL_PLACES`] before it feeds the next
//! formula. Rounding looks at the exact stored value and breaks exact ties to
//! even, so `0.125` becomes `0.12` while `2.675` (stored as `2.67499...`)
//! becomes `2.67`.

use crate::WattwiseError;
use crate::primitives::{DECIMAL_PLACES, ELECTRICITY_COST_PER_KWH, INEFFICIENCY_THRESHOLD_KWH};
use serde::{Deserialize, Serialize};

// =============================================================================
// POLICY
// =============================================================================

/// The two constants every formula is parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Consumption above which a machine is inefficient.
    pub inefficiency_threshold_kwh: f64,
    /// Currency per kWh.
    pub electricity_cost_per_kwh: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            inefficiency_threshold_kwh: INEFFICIENCY_THRESHOLD_KWH,
            electricity_cost_per_kwh: ELECTRICITY_COST_PER_KWH,
        }
    }
}

impl Policy {
    /// Check that the threshold is finite and positive and the cost finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), WattwiseError> {
        let threshold = self.inefficiency_threshold_kwh;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(WattwiseError::Config(format!(
                "inefficiency_threshold_kwh must be a positive number, got {}",
                threshold
            )));
        }

        let cost = self.electricity_cost_per_kwh;
        if !cost.is_finite() || cost < 0.0 {
            return Err(WattwiseError::Config(format!(
                "electricity_cost_per_kwh must be zero or positive, got {}",
                cost
            )));
        }

        Ok(())
    }
}

// =============================================================================
// ROUNDING
// =============================================================================

/// Round to `places` decimals, ties to even.
///
/// Scaling by a power of ten rounds once already and can turn a value just
/// below a tie into an exact tie, so the decimal formatter does the rounding
/// on the exact binary value instead.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = usize::try_from(places).unwrap_or(0);
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

fn round2(value: f64) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

// =============================================================================
// CALCULATOR
// =============================================================================

/// Metrics Calculator bound to a [`Policy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    policy: Policy,
}

impl Calculator {
    /// Create a calculator with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with a custom policy.
    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Energy consumption in kWh: `round(power * hours, 2)`.
    #[must_use]
    pub fn energy_consumption(&self, power_kw: f64, hours: f64) -> f64 {
        round2(power_kw * hours)
    }

    /// Hours that bring consumption down to the threshold:
    /// `round(threshold / power, 2)`.
    ///
    /// Callers are expected to have validated the power draw; this still
    /// returns `WattwiseError::Domain` for zero, negative or non-finite
    /// power instead of producing infinity or NaN.
    pub fn recommended_hours(&self, power_kw: f64) -> Result<f64, WattwiseError> {
        if !power_kw.is_finite() || power_kw <= 0.0 {
            return Err(WattwiseError::Domain(format!(
                "recommended hours require a positive power draw, got {} kW",
                power_kw
            )));
        }
        Ok(round2(self.policy.inefficiency_threshold_kwh / power_kw))
    }

    /// Energy savings in kWh: `round(consumption - power * recommended_hours, 2)`.
    #[must_use]
    pub fn energy_savings(&self, consumption_kwh: f64, power_kw: f64, recommended_hours: f64) -> f64 {
        round2(consumption_kwh - power_kw * recommended_hours)
    }

    /// Cost reduction in currency: `round(savings * cost_per_kwh, 2)`.
    #[must_use]
    pub fn cost_reduction(&self, energy_savings_kwh: f64) -> f64 {
        round2(energy_savings_kwh * self.policy.electricity_cost_per_kwh)
    }
}

// =============================================================================
// TESTS
// =============================================================================
