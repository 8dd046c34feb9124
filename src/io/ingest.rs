//! Input detection and parsing.
//!
//! Turns a text blob (JSON document or CSV table) into an ordered list of
//! `RawRecord`s. No validation happens here: values are kept exactly as the
//! source provided them so the validator can report on them row by row.
//!
//! CSV ragged rows: a short row is padded with empty strings for the missing
//! trailing columns (they then fail numeric coercion during validation); extra
//! trailing values in a long row are dropped.

use csv::StringRecord;
use serde_json::Value;
use tracing::debug;

use crate::domain::{FieldValue, InputFormat, RawRecord};

/// Detect the input format and parse it into raw records.
///
/// JSON wins when the trimmed text is bracketed by `{}` or `[]`; otherwise the
/// text is treated as CSV if it contains both a comma and a newline.
pub fn detect_and_parse(text: &str) -> (InputFormat, Vec<RawRecord>) {
    let text = text.trim();

    let looks_like_json =
        (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'));

    if looks_like_json {
        (InputFormat::Json, parse_json(text))
    } else if text.contains(',') && text.contains('\n') {
        (InputFormat::Csv, parse_csv(text))
    } else {
        (InputFormat::Unknown, Vec::new())
    }
}

/// Parse a JSON document: either a top-level array of model objects or an
/// object with a `models` array. Anything else yields no records.
pub fn parse_json(text: &str) -> Vec<RawRecord> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "malformed JSON input");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("models") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items.into_iter().map(record_from_json).collect()
}

fn record_from_json(item: Value) -> RawRecord {
    match item {
        Value::Object(obj) => obj.into_iter().map(|(k, v)| (k, FieldValue::from(v))).collect(),
        // Non-object entries carry no fields and fail the presence check later.
        _ => RawRecord::new(),
    }
}

/// Parse CSV text with a header row into one record per data row.
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            debug!(error = %e, "failed to read CSV header row");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(row) => records.push(record_from_row(&headers, &row)),
            Err(e) => {
                // +2: 1-based lines, header on line 1.
                debug!(line = idx + 2, error = %e, "skipping unreadable CSV row");
            }
        }
    }
    records
}

fn record_from_row(headers: &StringRecord, row: &StringRecord) -> RawRecord {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cell = row.get(i).unwrap_or("");
            (name, FieldValue::Text(cell.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "model_id,investment_amount,expected_return,volatility,risk_free_rate,market_index_level,beta";

    #[test]
    fn detects_json_array_and_object() {
        let (fmt, recs) = detect_and_parse(r#"  [{"model_id": "A"}]  "#);
        assert_eq!(fmt, InputFormat::Json);
        assert_eq!(recs.len(), 1);

        let (fmt, recs) = detect_and_parse(r#"{"models": [{"model_id": "A"}, {"model_id": "B"}]}"#);
        assert_eq!(fmt, InputFormat::Json);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].get("model_id"), Some(&FieldValue::Text("B".into())));
    }

    #[test]
    fn json_without_models_array_is_empty() {
        assert_eq!(detect_and_parse(r#"{"model_id": "A"}"#), (InputFormat::Json, vec![]));
        assert_eq!(detect_and_parse(r#"{"models": {"a": 1}}"#), (InputFormat::Json, vec![]));
        assert_eq!(detect_and_parse("{not json}"), (InputFormat::Json, vec![]));
    }

    #[test]
    fn json_keeps_numbers_as_received() {
        let (_, recs) = detect_and_parse(r#"[{"model_id": 7, "beta": 0.5}]"#);
        assert_eq!(recs[0].get("model_id"), Some(&FieldValue::Json(serde_json::json!(7))));
        assert_eq!(recs[0].get_f64("beta"), Some(0.5));
    }

    #[test]
    fn non_object_array_entries_become_empty_records() {
        let (_, recs) = detect_and_parse("[1, {\"a\": \"x\"}]");
        assert_eq!(recs.len(), 2);
        assert!(recs[0].is_empty());
    }

    #[test]
    fn detects_csv() {
        let text = format!("{HEADER}\nM1,100,5,10,1,1000,1.2\nM2,200,6,12,1,1100,0.9\n");
        let (fmt, recs) = detect_and_parse(&text);
        assert_eq!(fmt, InputFormat::Csv);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].get("model_id"), Some(&FieldValue::Text("M1".into())));
        assert_eq!(recs[1].get("beta"), Some(&FieldValue::Text("0.9".into())));
        let keys: Vec<&str> = recs[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, HEADER.split(',').collect::<Vec<_>>());
    }

    #[test]
    fn unknown_format() {
        assert_eq!(detect_and_parse(""), (InputFormat::Unknown, vec![]));
        assert_eq!(detect_and_parse("   \n  "), (InputFormat::Unknown, vec![]));
        assert_eq!(detect_and_parse("just some text"), (InputFormat::Unknown, vec![]));
        // A comma without a newline is not CSV.
        assert_eq!(detect_and_parse("a,b,c"), (InputFormat::Unknown, vec![]));
    }

    #[test]
    fn short_csv_row_is_padded_with_empty_strings() {
        let (_, recs) = detect_and_parse("a,b,c\n1,2\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].get("c"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn long_csv_row_drops_extra_values() {
        let (_, recs) = detect_and_parse("a,b\n1,2,3,4\n");
        assert_eq!(recs[0].len(), 2);
        assert_eq!(recs[0].get("b"), Some(&FieldValue::Text("2".into())));
    }

    #[test]
    fn duplicate_csv_header_last_column_wins() {
        let (_, recs) = detect_and_parse("a,b,a\n1,2,3\n");
        assert_eq!(recs[0].len(), 2);
        assert_eq!(recs[0].get("a"), Some(&FieldValue::Text("3".into())));
    }

    #[test]
    fn csv_header_only_has_no_records() {
        let (fmt, recs) = detect_and_parse("a,b\n");
        // Trimmed to "a,b": no newline left, so not CSV.
        assert_eq!(fmt, InputFormat::Unknown);
        assert!(recs.is_empty());

        assert!(parse_csv("a,b\n").is_empty());
    }

    #[test]
    fn csv_quoted_fields() {
        let (_, recs) = detect_and_parse("model_id,note\n\"M,1\",\"hello\"\n");
        assert_eq!(recs[0].get("model_id"), Some(&FieldValue::Text("M,1".into())));
    }
}
