//! Shared report pipeline used by the library entry point and the CLI.
//!
//! raw text -> parse -> validate (batch gate) -> calculate -> render

use thiserror::Error;
use tracing::{debug, warn};

use crate::calc::calculate;
use crate::domain::{CalculationResult, InputFormat, RawRecord, ValidatedRecord};
use crate::io::ingest::detect_and_parse;
use crate::report::render;
use crate::validate::{ValidationError, validate};

pub const FORMAT_ERROR_MESSAGE: &str = "ERROR: Invalid data format. Please provide data in CSV or JSON format.";

/// Why a batch produced no report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Undetectable format, or a detected format with no records.
    #[error("ERROR: Invalid data format. Please provide data in CSV or JSON format.")]
    Format,
    /// One or more rows failed validation.
    #[error("ERROR: Data validation failed.\n{}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub format: InputFormat,
    pub records: Vec<ValidatedRecord>,
    pub results: Vec<CalculationResult>,
    pub markdown: String,
}

/// Parse and validate, stopping before any calculation.
pub fn parse_and_validate(input: &str) -> Result<(InputFormat, Vec<ValidatedRecord>), PipelineError> {
    let (format, mut records) = detect_and_parse(input);
    debug!(input_format = %format, records = records.len(), "parsed input");

    if format == InputFormat::Unknown || records.is_empty() {
        return Err(PipelineError::Format);
    }

    let validation = validate(&mut records);
    if !validation.is_ok() {
        warn!(errors = validation.errors.len(), "validation failed");
        return Err(PipelineError::Validation(validation.into_errors()));
    }

    let validated = into_validated(records).map_err(|e| PipelineError::Validation(vec![e]))?;
    Ok((format, validated))
}

fn into_validated(records: Vec<RawRecord>) -> Result<Vec<ValidatedRecord>, ValidationError> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| ValidatedRecord::from_record(record, idx + 1))
        .collect()
}

/// Run the full pipeline, returning the typed outputs.
pub fn run_pipeline(input: &str) -> Result<PipelineOutput, PipelineError> {
    let (format, records) = parse_and_validate(input)?;

    let results: Vec<CalculationResult> = records.iter().map(calculate).collect();
    let markdown = render(&records, &results);
    debug!(models = records.len(), bytes = markdown.len(), "rendered report");

    Ok(PipelineOutput {
        format,
        records,
        results,
        markdown,
    })
}

/// Text in, text out: the markdown report, or an `ERROR: ...` message.
pub fn process(input: &str) -> String {
    match run_pipeline(input) {
        Ok(out) => out.markdown,
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SAMPLE_MODELS_JSON, sample_models_array};
    use crate::domain::{FieldValue, RiskStatus};
    use crate::io::ingest::detect_and_parse;

    const CSV_HEADER: &str = "model_id,investment_amount,expected_return,volatility,risk_free_rate,market_index_level,beta";

    #[test]
    fn format_errors() {
        assert_eq!(process(""), FORMAT_ERROR_MESSAGE);
        assert_eq!(process("hello world"), FORMAT_ERROR_MESSAGE);
        assert_eq!(process("[]"), FORMAT_ERROR_MESSAGE);
        assert_eq!(process(r#"{"other": []}"#), FORMAT_ERROR_MESSAGE);
        assert_eq!(process("{broken"), FORMAT_ERROR_MESSAGE);
        assert_eq!(process("{broken}"), FORMAT_ERROR_MESSAGE);
    }

    #[test]
    fn validation_failure_message() {
        let input = r#"[
            {"model_id": "A", "investment_amount": 0, "expected_return": 1, "volatility": 150,
             "risk_free_rate": 1, "market_index_level": 100, "beta": 1},
            {"model_id": "B", "investment_amount": 10, "expected_return": 1, "volatility": 10,
             "risk_free_rate": 1, "market_index_level": 100}
        ]"#;
        assert_eq!(
            process(input),
            "ERROR: Data validation failed.\n\
             ERROR: Invalid value for the field(s): investment_amount, volatility in row 1.\n\
             ERROR: Missing required field(s): beta in row 2."
        );
    }

    #[test]
    fn missing_beta_blocks_whole_batch() {
        let input = format!("{CSV_HEADER}\nM1,100,5,10,1,1000,1.2\n");
        let broken = input.replace(",beta", "").replace(",1.2", "");
        let err = run_pipeline(&broken).unwrap_err();
        match err {
            PipelineError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].to_string(), "ERROR: Missing required field(s): beta in row 1.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sample_batch_report() {
        let out = run_pipeline(SAMPLE_MODELS_JSON).unwrap();
        assert_eq!(out.format, InputFormat::Json);
        assert_eq!(out.records.len(), 6);
        assert!(out.markdown.contains("- **Total Risk Models Evaluated:** **6**"));

        let statuses: Vec<RiskStatus> = out.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                RiskStatus::Low,
                RiskStatus::Low,
                RiskStatus::Low,
                RiskStatus::Moderate,
                RiskStatus::Moderate,
                RiskStatus::Low,
            ]
        );

        let composites: Vec<f64> = out.results.iter().map(|r| r.composite_risk_score).collect();
        assert_eq!(composites, vec![2.5, 7.04, 23.4, 88.0, 63.7, 9.6]);
        assert_eq!(out.markdown.matches("## Final Recommendation").count(), 6);
        assert_eq!(out.markdown.matches("\n\n---\n\n\n### Model:").count(), 5);
    }

    #[test]
    fn wrapped_and_bare_json_agree() {
        let wrapped = run_pipeline(SAMPLE_MODELS_JSON).unwrap();
        let bare = run_pipeline(&sample_models_array()).unwrap();
        assert_eq!(wrapped.results, bare.results);
        assert_eq!(wrapped.markdown, bare.markdown);
    }

    #[test]
    fn csv_matches_json_after_coercion() {
        let csv = format!("{CSV_HEADER}\nJSONModel1,50,2,5,1,500,0.5\n");
        let json = r#"[{"model_id": "JSONModel1", "investment_amount": 50, "expected_return": 2,
            "volatility": 5, "risk_free_rate": 1, "market_index_level": 500, "beta": 0.5}]"#;

        let (csv_fmt, mut csv_recs) = detect_and_parse(&csv);
        let (json_fmt, mut json_recs) = detect_and_parse(json);
        assert_eq!(csv_fmt, InputFormat::Csv);
        assert_eq!(json_fmt, InputFormat::Json);
        assert!(validate(&mut csv_recs).is_ok());
        assert!(validate(&mut json_recs).is_ok());

        for name in crate::domain::REQUIRED_FIELDS.iter().skip(1) {
            assert_eq!(csv_recs[0].get(name), json_recs[0].get(name), "field {name}");
            assert!(matches!(csv_recs[0].get(name), Some(FieldValue::Number(_))));
        }

        let a = run_pipeline(&csv).unwrap();
        let b = run_pipeline(json).unwrap();
        assert_eq!(a.results, b.results);
        assert_eq!(a.markdown, b.markdown);
    }

    #[test]
    fn zero_volatility_end_to_end() {
        let csv = format!("{CSV_HEADER}\nZ,100,5,0,1,1000,1\n");
        let out = run_pipeline(&csv).unwrap();
        assert_eq!(out.results[0].sharpe_ratio, 0.0);
        assert!(out.markdown.contains("4.00 / 0.00 = 0\n"));
        assert!(out.markdown.contains(" - **Result:** **0**\n"));
    }
}
