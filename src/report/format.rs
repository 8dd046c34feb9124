//! Number formatting and a small markdown builder for the report.
//!
//! All numeric text in the report goes through two functions:
//!
//! - `fmt_value`: shortest round-trip rendering, always with a decimal point
//!   for integral values (`50.0`, `2.5`, `1e+16`)
//! - `fmt_2dp`: fixed two decimals of the half-even rounded value (`0.05`)

use serde_json::Value;

use crate::domain::FieldValue;
use crate::math::round2;

/// Shortest representation that parses back to `x`.
///
/// Integral values keep a trailing `.0`. Magnitudes below `1e-4` or from
/// `1e16` upward use exponent form with a signed, two-digit exponent.
pub fn fmt_value(x: f64) -> String {
    if let Some(s) = fmt_non_finite(x) {
        return s;
    }

    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return fmt_exponent(x);
    }

    let s = format!("{x}");
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Two fixed decimals, ties to even on the stored value.
pub fn fmt_2dp(x: f64) -> String {
    if let Some(s) = fmt_non_finite(x) {
        return s;
    }
    format!("{:.2}", round2(x))
}

/// Sharpe ratio text; a zero-volatility model shows a bare `0`.
pub fn fmt_sharpe(volatility: f64, sharpe: f64) -> String {
    if volatility == 0.0 {
        return "0".to_string();
    }
    fmt_value(sharpe)
}

/// Display text for a raw field value (used for the model identifier).
pub fn fmt_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(v) => fmt_value(*v),
        FieldValue::Json(Value::Number(n)) if n.is_f64() => n.as_f64().map(fmt_value).unwrap_or_else(|| n.to_string()),
        FieldValue::Json(Value::String(s)) => s.clone(),
        FieldValue::Json(other) => other.to_string(),
    }
}

fn fmt_non_finite(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("nan".to_string())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

fn fmt_exponent(x: f64) -> String {
    // `{:e}` gives the shortest mantissa, e.g. "1.5e-5".
    let s = format!("{x:e}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

/// Line-oriented markdown builder.
#[derive(Debug, Default)]
pub struct Markdown {
    buf: String,
}

impl Markdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    /// A line ending in a markdown hard break (two trailing spaces).
    pub fn break_line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self.buf.push_str("  \n");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.line("---")
    }

    pub fn heading(&mut self, level: usize, text: impl AsRef<str>) -> &mut Self {
        let hashes = "#".repeat(level.max(1));
        self.line(format!("{hashes} {}", text.as_ref()))
    }

    /// `- **Label:** value`
    pub fn field(&mut self, label: &str, value: impl AsRef<str>) -> &mut Self {
        self.line(format!("- **{label}:** {}", value.as_ref()))
    }

    /// `- **Label:** **value**`
    pub fn bold_field(&mut self, label: &str, value: impl AsRef<str>) -> &mut Self {
        self.line(format!("- **{label}:** **{}**", value.as_ref()))
    }

    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// One numbered calculation block: formula, substituted steps, result.
#[derive(Debug, Clone)]
pub struct FormulaSection {
    pub title: &'static str,
    /// LaTeX body, rendered between `$$` delimiters.
    pub formula: &'static str,
    pub steps: Vec<String>,
    pub result: String,
}

impl FormulaSection {
    pub fn write(&self, number: usize, md: &mut Markdown) {
        md.line(format!("{number}. ### **{}**", self.title));
        md.break_line(" - **Formula:**");
        md.line(format!(" $$ {} $$", self.formula));
        md.break_line(" - **Steps:**");
        let last = self.steps.len().saturating_sub(1);
        for (i, step) in self.steps.iter().enumerate() {
            let text = format!(" {}. {step}", i + 1);
            if i < last {
                md.break_line(text);
            } else {
                md.line(text);
            }
        }
        md.line(format!(" - **Result:** **{}**", self.result));
    }
}
