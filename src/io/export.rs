//! Export per-model results to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{CalculationResult, ValidatedRecord};
use crate::error::{AppError, EXIT_IO};
use crate::report::format::{fmt_sharpe, fmt_value};

/// One exported row: the model identifier plus all calculated fields.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow<'a> {
    pub model_id: &'a str,
    #[serde(flatten)]
    pub result: &'a CalculationResult,
}

pub fn result_rows<'a>(records: &'a [ValidatedRecord], results: &'a [CalculationResult]) -> Vec<ResultRow<'a>> {
    records
        .iter()
        .zip(results)
        .map(|(record, result)| ResultRow {
            model_id: &record.model_id,
            result,
        })
        .collect()
}

/// Write results as CSV with a header row.
pub fn write_results_csv<W: Write>(
    out: W,
    records: &[ValidatedRecord],
    results: &[CalculationResult],
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record([
            "model_id",
            "risk_index",
            "beta_adjusted_volatility",
            "composite_risk_score",
            "sharpe_ratio",
            "beta_impact_score",
            "var",
            "status",
            "recommendation",
        ])
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export CSV header: {e}")))?;

    for (record, r) in records.iter().zip(results) {
        writer
            .write_record([
                record.model_id.clone(),
                fmt_value(r.risk_index),
                fmt_value(r.beta_adjusted_volatility),
                fmt_value(r.composite_risk_score),
                fmt_sharpe(record.inputs.volatility, r.sharpe_ratio),
                fmt_value(r.beta_impact_score),
                fmt_value(r.var),
                r.status.label().to_string(),
                r.recommendation.clone(),
            ])
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to flush export CSV: {e}")))
}

/// Write results as a pretty-printed JSON array.
pub fn write_results_json<W: Write>(
    out: W,
    records: &[ValidatedRecord],
    results: &[CalculationResult],
) -> Result<(), AppError> {
    let rows = result_rows(records, results);
    serde_json::to_writer_pretty(out, &rows)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export JSON: {e}")))
}

pub fn export_csv_file(path: &Path, records: &[ValidatedRecord], results: &[CalculationResult]) -> Result<(), AppError> {
    let file = create(path, "CSV")?;
    write_results_csv(file, records, results)
}

pub fn export_json_file(path: &Path, records: &[ValidatedRecord], results: &[CalculationResult]) -> Result<(), AppError> {
    let file = create(path, "JSON")?;
    write_results_json(file, records, results)
}

fn create(path: &Path, kind: &str) -> Result<File, AppError> {
    File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create export {kind} '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_pipeline;
    use crate::data::SAMPLE_MODELS_JSON;

    #[test]
    fn csv_export_rows() {
        let run = run_pipeline(SAMPLE_MODELS_JSON).unwrap();
        let mut buf = Vec::new();
        write_results_csv(&mut buf, &run.records, &run.results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "model_id,risk_index,beta_adjusted_volatility,composite_risk_score,sharpe_ratio,beta_impact_score,var,status,recommendation"
        );
        assert_eq!(lines[1], "JSONModel1,2.5,2.5,2.5,20.0,250.0,4.12,Low Risk,Minimal risk; standard monitoring.");
        assert!(lines[4].starts_with("JSONModel4,120.0,40.0,88.0,17.5,1800.0,198.0,Moderate Risk,"));
    }

    #[test]
    fn json_export_has_all_keys() {
        let run = run_pipeline(SAMPLE_MODELS_JSON).unwrap();
        let mut buf = Vec::new();
        write_results_json(&mut buf, &run.records, &run.results).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), 6);
        let first = rows[0].as_object().unwrap();
        assert_eq!(first.len(), 9);
        assert_eq!(first["model_id"], "JSONModel1");
        assert_eq!(first["composite_risk_score"], 2.5);
        assert_eq!(rows[4]["status"], "Moderate Risk");
    }

    #[test]
    fn csv_export_numbers_match_report_text() {
        let csv = "model_id,investment_amount,expected_return,volatility,risk_free_rate,market_index_level,beta\nZ,100,5,0,1,1000,1\n";
        let run = run_pipeline(csv).unwrap();
        let mut buf = Vec::new();
        write_results_csv(&mut buf, &run.records, &run.results).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().nth(1), Some("Z,0.0,0.0,0.0,0,1000.0,0.0,Low Risk,Minimal risk; standard monitoring."));
        assert!(run.markdown.contains(" - **Result:** **1000.0**"));
    }

    #[test]
    fn unwritable_export_path_is_io_error() {
        let err = export_csv_file(Path::new("/definitely/not/here/out.csv"), &[], &[]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
    }
}
