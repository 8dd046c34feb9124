use crate::domain::{CalculationResult, ModelInputs, RiskStatus, ValidatedRecord};
use crate::math::round2;

/// Weight of the risk index in the composite score.
pub const RISK_INDEX_WEIGHT: f64 = 0.6;
/// Weight of the beta adjusted volatility in the composite score.
pub const BETA_VOLATILITY_WEIGHT: f64 = 0.4;
/// One-sided 95% confidence multiplier used for VaR.
pub const VAR_CONFIDENCE_FACTOR: f64 = 1.65;

/// Volatility expressed as a decimal fraction.
pub fn volatility_decimal(inputs: &ModelInputs) -> f64 {
    inputs.volatility / 100.0
}

pub fn risk_index(inputs: &ModelInputs) -> f64 {
    inputs.investment_amount * volatility_decimal(inputs)
}

pub fn beta_adjusted_volatility(inputs: &ModelInputs) -> f64 {
    inputs.volatility * inputs.beta
}

/// Weighted blend of the already rounded risk index and beta adjusted volatility.
pub fn composite_risk_score(risk_index: f64, beta_adjusted_volatility: f64) -> f64 {
    risk_index * RISK_INDEX_WEIGHT + beta_adjusted_volatility * BETA_VOLATILITY_WEIGHT
}

pub fn excess_return(inputs: &ModelInputs) -> f64 {
    inputs.expected_return - inputs.risk_free_rate
}

/// Excess return over decimal volatility; zero volatility gives 0.
pub fn sharpe_ratio(inputs: &ModelInputs) -> f64 {
    let vol = volatility_decimal(inputs);
    if vol == 0.0 {
        return 0.0;
    }
    excess_return(inputs) / vol
}

pub fn beta_impact_score(inputs: &ModelInputs) -> f64 {
    inputs.market_index_level * inputs.beta
}

pub fn value_at_risk(inputs: &ModelInputs) -> f64 {
    risk_index(inputs) * VAR_CONFIDENCE_FACTOR
}

/// Compute every metric for one validated record.
pub fn calculate(record: &ValidatedRecord) -> CalculationResult {
    calculate_inputs(&record.inputs)
}

pub fn calculate_inputs(inputs: &ModelInputs) -> CalculationResult {
    let risk_index = round2(risk_index(inputs));
    let beta_adjusted_volatility = round2(beta_adjusted_volatility(inputs));
    let composite_risk_score = round2(composite_risk_score(risk_index, beta_adjusted_volatility));
    let status = RiskStatus::from_composite(composite_risk_score);

    CalculationResult {
        risk_index,
        beta_adjusted_volatility,
        composite_risk_score,
        sharpe_ratio: round2(sharpe_ratio(inputs)),
        beta_impact_score: round2(beta_impact_score(inputs)),
        var: round2(value_at_risk(inputs)),
        status,
        recommendation: status.recommendation().to_string(),
    }
}
