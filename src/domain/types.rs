//! Shared domain types.
//!
//! Records move through the pipeline in three shapes:
//!
//! - `RawRecord`: whatever the parser produced (strings from CSV, JSON values)
//! - `ValidatedRecord`: a coerced record plus its typed numeric inputs
//! - `CalculationResult`: the derived metrics for one validated record

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Fields every model record must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "model_id",
    "investment_amount",
    "expected_return",
    "volatility",
    "risk_free_rate",
    "market_index_level",
    "beta",
];

/// Detected shape of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    Json,
    Csv,
    Unknown,
}

impl InputFormat {
    pub fn label(self) -> &'static str {
        match self {
            InputFormat::Json => "JSON",
            InputFormat::Csv => "CSV",
            InputFormat::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single raw field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// CSV cells and JSON strings, untouched.
    Text(String),
    /// A value the validator has coerced to a float.
    Number(f64),
    /// Any other JSON value, kept as received.
    Json(Value),
}

impl FieldValue {
    /// Interpret the value as a float.
    ///
    /// Text is trimmed and parsed (`inf`/`nan` included). JSON booleans count
    /// as 1/0; null, arrays and objects do not convert.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Number(v) => Some(*v),
            FieldValue::Json(Value::Number(n)) => n.as_f64(),
            FieldValue::Json(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Json(Value::String(s)) => s.trim().parse::<f64>().ok(),
            FieldValue::Json(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Json(other),
        }
    }
}

/// Ordered field-name -> value mapping produced by the parser.
///
/// Order follows first insertion; inserting an existing key replaces the value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Typed get: the field's value as a float, if present and numeric.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.to_f64()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Names from `required` absent from this record, in `required` order.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required.iter().copied().filter(|name| !self.contains(name)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Typed numeric inputs for the risk formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInputs {
    pub investment_amount: f64,
    pub expected_return: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
    pub market_index_level: f64,
    pub beta: f64,
}

/// A record that passed validation.
///
/// Keeps the coerced raw record (so non-numeric fields survive) next to the
/// typed view the calculator works from.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub model_id: String,
    pub inputs: ModelInputs,
    pub record: RawRecord,
}

/// Risk bucket derived from the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStatus {
    Low,
    Moderate,
    High,
}

impl RiskStatus {
    /// Classify a (rounded) composite risk score. Both 50 and 100 are moderate.
    pub fn from_composite(score: f64) -> Self {
        if score < 50.0 {
            RiskStatus::Low
        } else if score <= 100.0 {
            RiskStatus::Moderate
        } else {
            RiskStatus::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskStatus::Low => "Low Risk",
            RiskStatus::Moderate => "Moderate Risk",
            RiskStatus::High => "High Risk",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskStatus::Low => "Minimal risk; standard monitoring.",
            RiskStatus::Moderate => "Consider risk mitigation strategies.",
            RiskStatus::High => "Immediate action required: Rebalance portfolio.",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Derived metrics for one model. All numbers are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub risk_index: f64,
    pub beta_adjusted_volatility: f64,
    pub composite_risk_score: f64,
    pub sharpe_ratio: f64,
    pub beta_impact_score: f64,
    pub var: f64,
    pub status: RiskStatus,
    pub recommendation: String,
}
