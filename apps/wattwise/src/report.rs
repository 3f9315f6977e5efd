//! # Report Assembler
//!
//! Renders an [`Analysis`] as a markdown document.
//!
//! Sections, in order:
//! 1. Data validation checklist
//! 2. Formula reference (optional)
//! 3. Fleet summary
//! 4. Per-machine breakdown, in input order
//! 5. Feedback prompt (optional)
//!
//! Every number embedded in the text is the calculator's own output; the
//! assembler never recomputes or re-rounds.

use serde::{Deserialize, Serialize};
use wattwise_core::{
    Analysis, MachineAnalysis, MachineMetrics, MachineOutcome, MachineRecord, Policy,
    ValidationResult,
};

// =============================================================================
// OPTIONS
// =============================================================================

/// Optional report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    pub include_formulas: bool,
    pub include_feedback_prompt: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_formulas: true,
            include_feedback_prompt: true,
        }
    }
}

// =============================================================================
// NUMBER FORMATTING
// =============================================================================

/// Shortest round-trip form, always with a decimal point (`95.0`, `5.26`).
///
/// Magnitudes of `1e16` and above or below `1e-4` switch to exponent form
/// with a signed, two-digit exponent (`1e+16`, `2.5e-07`).
pub fn fmt_num(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Threshold as written in formulas (`500`, `512.5`).
fn fmt_threshold(policy: &Policy) -> String {
    format!("{}", policy.inefficiency_threshold_kwh)
}

/// Electricity rate with at least two decimals (`0.10`, `0.125`).
fn fmt_rate(policy: &Policy) -> String {
    let rate = policy.electricity_cost_per_kwh;
    let padded = format!("{:.2}", rate);
    if padded.parse::<f64>() == Ok(rate) {
        padded
    } else {
        format!("{}", rate)
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render the full markdown report.
pub fn render_markdown(analysis: &Analysis, options: &ReportOptions) -> String {
    let mut lines = render_validation(&analysis.validation);
    lines.push(String::new());

    if options.include_formulas {
        lines.extend(render_formulas(&analysis.policy));
        lines.push(String::new());
    }

    lines.extend(render_summary(analysis));
    lines.push(String::new());
    lines.push("# Detailed Analysis".to_string());

    for machine in &analysis.machines {
        lines.extend(render_machine(machine, &analysis.policy));
        lines.push(String::new());
    }

    if options.include_feedback_prompt {
        lines.push("# Feedback Request".to_string());
        lines.push(
            "Would you like detailed calculations for any specific machine? \
             Please rate this analysis on a scale of 1-5."
                .to_string(),
        );
    }

    lines.join("\n")
}

/// Render only the validation checklist.
pub fn render_validation_report(validation: &ValidationResult) -> String {
    render_validation(validation).join("\n")
}

fn render_validation(validation: &ValidationResult) -> Vec<String> {
    let structural = &validation.structural;
    let required = &structural.required_fields;
    let types = &validation.type_checks;

    let summary = if validation.is_valid() {
        "Data validation is successful! Proceeding with analysis...".to_string()
    } else {
        format!(
            "Data validation found invalid values in: {}. \
             Proceeding with analysis using the values as given...",
            validation.invalid_fields().join(", ")
        )
    };

    vec![
        "# Data Validation Report".to_string(),
        "## 1. Data Structure Check:".to_string(),
        format!("- Number of machines: {}", structural.record_count),
        format!("- Number of fields per record: {}", structural.fields_per_record),
        String::new(),
        "## 2. Required Fields Check:".to_string(),
        format!("- machine_id: {}", required.machine_id),
        format!("- power_usage_kw: {}", required.power_usage_kw),
        format!("- operational_hours: {}", required.operational_hours),
        String::new(),
        "## 3. Data Type and Value Validation:".to_string(),
        format!("- power_usage_kw (positive number): {}", types.power_usage_kw),
        format!("- operational_hours (number > 0): {}", types.operational_hours),
        String::new(),
        "## Validation Summary:".to_string(),
        summary,
    ]
}

fn render_formulas(policy: &Policy) -> Vec<String> {
    let threshold = fmt_threshold(policy);
    let rate = fmt_rate(policy);

    vec![
        "# Formulas Used:".to_string(),
        "1. Energy Consumption:".to_string(),
        "   $$".to_string(),
        r"   \text{Energy Consumption (kWh)} = \text{power_usage_kw} \times \text{operational_hours}"
            .to_string(),
        "   $$".to_string(),
        "2. Recommended Operational Hours (if inefficient):".to_string(),
        "   $$".to_string(),
        format!(
            r"   \text{{Recommended Operational Hours}} = \frac{{{}}}{{\text{{power_usage_kw}}}}",
            threshold
        ),
        "   $$".to_string(),
        "3. Energy Savings:".to_string(),
        "   $$".to_string(),
        r"   \text{Energy Savings (kWh)} = \text{Energy Consumption} - (\text{power_usage_kw} \times \text{Recommended Operational Hours})"
            .to_string(),
        "   $$".to_string(),
        "4. Electricity Cost Reduction:".to_string(),
        "   $$".to_string(),
        format!(
            r"   \text{{Cost Reduction (\$)}} = \text{{Energy Savings (kWh)}} \times {}",
            rate
        ),
        "   $$".to_string(),
    ]
}

fn render_summary(analysis: &Analysis) -> Vec<String> {
    let summary = &analysis.summary;

    let mut lines = vec![
        "# Machine Efficiency Summary".to_string(),
        format!("Total Machines Evaluated: {}", summary.machines_evaluated),
        format!("- Efficient: {}", summary.efficient),
        format!("- Inefficient: {}", summary.inefficient),
    ];
    if summary.failed > 0 {
        lines.push(format!("- Not assessed: {}", summary.failed));
    }
    lines.push(format!(
        "- Total Energy Consumption: {} kWh",
        fmt_num(summary.total_consumption_kwh)
    ));
    lines.push(format!(
        "- Potential Energy Savings: {} kWh",
        fmt_num(summary.total_savings_kwh)
    ));
    lines.push(format!(
        "- Potential Cost Reduction: ${}",
        fmt_num(summary.total_cost_reduction)
    ));
    lines
}

fn render_machine(machine: &MachineAnalysis, policy: &Policy) -> Vec<String> {
    let record = &machine.record;
    let mut lines = vec![
        format!("## Machine {}", record.machine_id()),
        "### Input Data:".to_string(),
        format!("- Power Usage: {} kW", fmt_num(record.power_usage_kw())),
        format!(
            "- Operational Hours: {} hours",
            fmt_num(record.operational_hours())
        ),
        String::new(),
        "### Detailed Calculations:".to_string(),
    ];

    match &machine.outcome {
        MachineOutcome::Assessed(metrics) => lines.extend(render_metrics(record, metrics, policy)),
        MachineOutcome::Failed { reason } => {
            lines.push(format!("Analysis failed: {}", reason));
            lines.push(String::new());
            lines.push("### Application Summary:".to_string());
            lines.push("- Status: Not assessed".to_string());
        }
    }

    lines
}

fn render_metrics(record: &MachineRecord, metrics: &MachineMetrics, policy: &Policy) -> Vec<String> {
    let power = fmt_num(record.power_usage_kw());
    let consumption = fmt_num(metrics.energy_consumption_kwh);
    let threshold = fmt_threshold(policy);

    let mut lines = vec![
        "1. **Energy Consumption Calculation:**".to_string(),
        r"   - Formula: $ \text{Energy Consumption} = \text{power_usage_kw} \times \text{operational_hours} $"
            .to_string(),
        format!(
            r"   - Calculation: ${} \times {} = {}$ kWh",
            power,
            fmt_num(record.operational_hours()),
            consumption
        ),
        String::new(),
        "2. **Efficiency Check:**".to_string(),
    ];

    match &metrics.recommendation {
        Some(rec) => {
            let hours = fmt_num(rec.recommended_hours);
            let savings = fmt_num(rec.energy_savings_kwh);
            let cost = fmt_num(rec.cost_reduction);

            lines.extend([
                format!(
                    "   - Machine is flagged as inefficient ({} kWh > {} kWh)",
                    consumption, threshold
                ),
                "   - Compute Recommended Operational Hours:".to_string(),
                format!(
                    r"     $ \text{{Recommended Operational Hours}} = \frac{{{}}}{{{}}} = {} $ hours",
                    threshold, power, hours
                ),
                "   - Compute Energy Savings:".to_string(),
                format!(
                    r"     $ \text{{Energy Savings}} = {} - ({} \times {}) = {} $ kWh",
                    consumption, power, hours, savings
                ),
                "   - Compute Cost Reduction:".to_string(),
                format!(
                    r"     $ \text{{Cost Reduction}} = {} \times {} = \${} $",
                    savings,
                    fmt_rate(policy),
                    cost
                ),
                String::new(),
                "### Final Recommendation:".to_string(),
                format!(
                    "Reduce operational hours to {} hours for an expected cost reduction of ${}.",
                    hours, cost
                ),
            ]);
        }
        None => {
            lines.extend([
                format!(
                    "   - Machine is operating efficiently ({} kWh ≤ {} kWh)",
                    consumption, threshold
                ),
                String::new(),
                "### Final Recommendation:".to_string(),
                "Machine is operating efficiently. No changes recommended.".to_string(),
            ]);
        }
    }

    lines.extend([
        String::new(),
        "### Application Summary:".to_string(),
        format!("- Energy Consumption: {} kWh", consumption),
        format!("- Status: {}", metrics.status()),
    ]);

    lines
}

// =============================================================================
// TESTS
// =============================================================================
