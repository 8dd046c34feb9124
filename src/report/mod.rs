//! Markdown report rendering.
//!
//! The report shows, per model, the raw inputs, every formula with its
//! substituted arithmetic, and the final classification. Formatting of numbers
//! lives in `format` so the step text always matches what a hand derivation
//! would produce.

pub mod format;

use crate::calc::{BETA_VOLATILITY_WEIGHT, RISK_INDEX_WEIGHT, VAR_CONFIDENCE_FACTOR};
use crate::domain::{CalculationResult, ModelInputs, ValidatedRecord};
use crate::math::round2;

use self::format::{FormulaSection, Markdown, fmt_2dp, fmt_sharpe, fmt_value};

const SEPARATOR: &str = "\n\n---\n\n";

/// Render the full report for index-aligned records and results.
pub fn render(records: &[ValidatedRecord], results: &[CalculationResult]) -> String {
    debug_assert_eq!(records.len(), results.len());

    let mut md = Markdown::new();
    md.heading(1, "Financial Risk Model Report")
        .blank()
        .rule()
        .blank()
        .heading(2, "Overview")
        .bold_field("Total Risk Models Evaluated", records.len().to_string())
        .blank()
        .rule()
        .blank()
        .heading(2, "Detailed Analysis per Model");

    let n = records.len().min(results.len());
    for (i, (record, result)) in records.iter().zip(results).enumerate() {
        write_model(&mut md, record, result);
        write_recommendation(&mut md, result);
        if i + 1 < n {
            md.raw(SEPARATOR);
        }
    }

    md.finish()
}

fn write_model(md: &mut Markdown, record: &ValidatedRecord, result: &CalculationResult) {
    let x = &record.inputs;

    md.blank()
        .heading(3, format!("Model: **{}**", record.model_id))
        .blank()
        .heading(4, "Input Data")
        .field("Investment Amount", fmt_value(x.investment_amount))
        .field("Expected Return (%)", fmt_value(x.expected_return))
        .field("Volatility (%)", fmt_value(x.volatility))
        .field("Risk Free Rate (%)", fmt_value(x.risk_free_rate))
        .field("Market Index Level", fmt_value(x.market_index_level))
        .field("Beta", fmt_value(x.beta))
        .blank()
        .rule()
        .blank()
        .heading(4, "Calculation Details")
        .blank();

    let sections = formula_sections(x, result);
    let last = sections.len() - 1;
    for (i, section) in sections.iter().enumerate() {
        section.write(i + 1, md);
        if i < last {
            md.blank();
        }
    }
}

fn write_recommendation(md: &mut Markdown, result: &CalculationResult) {
    md.blank()
        .rule()
        .blank()
        .heading(2, "Final Recommendation")
        .blank()
        .bold_field("Composite Risk Score", fmt_value(result.composite_risk_score))
        .bold_field("Status", result.status.label())
        .bold_field("Recommended Action", &result.recommendation);
}

/// The six calculation blocks with literal values substituted.
pub fn formula_sections(x: &ModelInputs, r: &CalculationResult) -> [FormulaSection; 6] {
    let vol = fmt_value(x.volatility);
    let vol_dec = fmt_2dp(x.volatility / 100.0);
    let inv = fmt_value(x.investment_amount);
    let beta = fmt_value(x.beta);

    let ri_weighted = fmt_value(round2(r.risk_index * RISK_INDEX_WEIGHT));
    let bav_weighted = fmt_value(round2(r.beta_adjusted_volatility * BETA_VOLATILITY_WEIGHT));
    let excess = fmt_2dp(x.expected_return - x.risk_free_rate);
    let base_risk = fmt_value(round2(x.investment_amount * x.volatility / 100.0));
    let sharpe = fmt_sharpe(x.volatility, r.sharpe_ratio);

    [
        FormulaSection {
            title: "Risk Index Calculation",
            formula: r"\text{Risk Index} = \text{investment_amount} \times \frac{\text{volatility}}{100}",
            steps: vec![
                format!("Divide *volatility* by 100: {vol} / 100 = {vol_dec}"),
                format!(
                    "Multiply the result by *investment_amount*: {inv} × {vol_dec} = {}",
                    fmt_value(r.risk_index)
                ),
            ],
            result: fmt_value(r.risk_index),
        },
        FormulaSection {
            title: "Beta Adjusted Volatility Calculation",
            formula: r"\text{Beta Adjusted Volatility} = \text{volatility} \times \text{beta}",
            steps: vec![format!(
                "Multiply *volatility* by *beta*: {vol} × {beta} = {}",
                fmt_value(r.beta_adjusted_volatility)
            )],
            result: fmt_value(r.beta_adjusted_volatility),
        },
        FormulaSection {
            title: "Composite Risk Score Calculation",
            formula: r"\text{Composite Risk Score} = (\text{Risk Index} \times 0.6) + (\text{Beta Adjusted Volatility} \times 0.4)",
            steps: vec![
                format!(
                    "Multiply *Risk Index* by 0.6: {} × 0.6 = {ri_weighted}",
                    fmt_value(r.risk_index)
                ),
                format!(
                    "Multiply *Beta Adjusted Volatility* by 0.4: {} × 0.4 = {bav_weighted}",
                    fmt_value(r.beta_adjusted_volatility)
                ),
                format!(
                    "Add the two results together: {ri_weighted} + {bav_weighted} = {}",
                    fmt_value(r.composite_risk_score)
                ),
            ],
            result: fmt_value(r.composite_risk_score),
        },
        FormulaSection {
            title: "Sharpe Ratio Calculation",
            formula: r"\text{Sharpe Ratio} = \frac{\text{expected_return} - \text{risk_free_rate}}{\frac{\text{volatility}}{100}}",
            steps: vec![
                format!(
                    "Subtract *risk_free_rate* from *expected_return* to calculate the excess return: {} - {} = {excess}",
                    fmt_value(x.expected_return),
                    fmt_value(x.risk_free_rate)
                ),
                format!("Convert *volatility* to a decimal by dividing by 100: {vol} / 100 = {vol_dec}"),
                format!("Divide the excess return by the decimal value of *volatility*: {excess} / {vol_dec} = {sharpe}"),
            ],
            result: sharpe,
        },
        FormulaSection {
            title: "Beta Impact Score Calculation",
            formula: r"\text{Beta Impact Score} = \text{market_index_level} \times \text{beta}",
            steps: vec![format!(
                "Multiply *market_index_level* by *beta*: {} × {beta} = {}",
                fmt_value(x.market_index_level),
                fmt_value(r.beta_impact_score)
            )],
            result: fmt_value(r.beta_impact_score),
        },
        FormulaSection {
            title: "Value at Risk (VaR) Estimation Calculation",
            formula: r"\text{VaR} = \text{investment_amount} \times \frac{\text{volatility}}{100} \times 1.65",
            steps: vec![
                format!("Divide *volatility* by 100: {vol} / 100 = {vol_dec}"),
                format!(
                    "Multiply the result by *investment_amount* to get the base risk: {inv} × {vol_dec} = {base_risk}"
                ),
                format!(
                    "Multiply the base risk by {VAR_CONFIDENCE_FACTOR} (confidence factor for 95% confidence interval): {base_risk} × {VAR_CONFIDENCE_FACTOR} = {}",
                    fmt_value(r.var)
                ),
            ],
            result: fmt_value(r.var),
        },
    ]
}
