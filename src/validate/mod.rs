//! Record validation.
//!
//! Validation is a batch gate: every row is checked, every problem is
//! collected, and the batch proceeds only when the error list is empty.
//!
//! Numeric fields are coerced in place. A value that parses is written back as
//! `FieldValue::Number` before its range predicate runs, so an out-of-range
//! value is still left coerced.

use std::fmt;

use crate::domain::{FieldValue, ModelInputs, REQUIRED_FIELDS, RawRecord, ValidatedRecord};

/// Range predicate applied to a coerced numeric field.
type Predicate = fn(f64) -> bool;

/// Numeric fields and their accepted ranges, in check order.
const NUMERIC_CONSTRAINTS: [(&str, Predicate); 6] = [
    ("investment_amount", |x| x > 0.0),
    ("expected_return", |x| (-100.0..=100.0).contains(&x)),
    ("volatility", |x| (0.0..=100.0).contains(&x)),
    ("risk_free_rate", |x| (0.0..=100.0).contains(&x)),
    ("market_index_level", |x| x > 0.0),
    ("beta", |x| (0.0..=2.0).contains(&x)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    NoData,
    MissingFields(Vec<&'static str>),
    InvalidFields(Vec<&'static str>),
}

/// A validation problem tied to a 1-based row (`row` is 0 for `NoData`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub row: usize,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::NoData => write!(f, "ERROR: No data provided."),
            ValidationErrorKind::MissingFields(names) => write!(
                f,
                "ERROR: Missing required field(s): {} in row {}.",
                names.join(", "),
                self.row
            ),
            ValidationErrorKind::InvalidFields(names) => write!(
                f,
                "ERROR: Invalid value for the field(s): {} in row {}.",
                names.join(", "),
                self.row
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of validating a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rendered error messages, in row order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Validate a batch, coercing numeric fields in place.
pub fn validate(records: &mut [RawRecord]) -> Validation {
    if records.is_empty() {
        return Validation {
            errors: vec![ValidationError {
                row: 0,
                kind: ValidationErrorKind::NoData,
            }],
        };
    }

    let mut errors = Vec::new();
    for (idx, record) in records.iter_mut().enumerate() {
        if let Some(kind) = validate_record(record) {
            errors.push(ValidationError { row: idx + 1, kind });
        }
    }
    Validation { errors }
}

fn validate_record(record: &mut RawRecord) -> Option<ValidationErrorKind> {
    let missing = record.missing(&REQUIRED_FIELDS);
    if !missing.is_empty() {
        // No coercion for rows that lack fields.
        return Some(ValidationErrorKind::MissingFields(missing));
    }

    let mut invalid = Vec::new();
    for (name, accepts) in NUMERIC_CONSTRAINTS {
        match record.get_f64(name) {
            Some(value) => {
                record.insert(name, FieldValue::Number(value));
                if !accepts(value) {
                    invalid.push(name);
                }
            }
            None => invalid.push(name),
        }
    }

    if invalid.is_empty() {
        None
    } else {
        Some(ValidationErrorKind::InvalidFields(invalid))
    }
}

impl ValidatedRecord {
    /// Build the typed view of a record that passed `validate`.
    ///
    /// Fails with the same error `validate` would report when a required field
    /// is absent or non-numeric. `row` is 1-based.
    pub fn from_record(record: RawRecord, row: usize) -> Result<Self, ValidationError> {
        let missing = record.missing(&REQUIRED_FIELDS);
        if !missing.is_empty() {
            return Err(ValidationError {
                row,
                kind: ValidationErrorKind::MissingFields(missing),
            });
        }

        let mut values = [0.0; 6];
        let mut invalid = Vec::new();
        for (slot, (name, _)) in values.iter_mut().zip(NUMERIC_CONSTRAINTS) {
            match record.get_f64(name) {
                Some(v) => *slot = v,
                None => invalid.push(name),
            }
        }
        if !invalid.is_empty() {
            return Err(ValidationError {
                row,
                kind: ValidationErrorKind::InvalidFields(invalid),
            });
        }

        let [investment_amount, expected_return, volatility, risk_free_rate, market_index_level, beta] = values;
        let model_id = record
            .get("model_id")
            .map(crate::report::format::fmt_field)
            .unwrap_or_default();

        Ok(Self {
            model_id,
            inputs: ModelInputs {
                investment_amount,
                expected_return,
                volatility,
                risk_free_rate,
                market_index_level,
                beta,
            },
            record,
        })
    }
}
