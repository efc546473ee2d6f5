//! Ingest: turn uploaded bytes or files into a [`Dataset`].
//!
//! All parse and validation failures stop here — once a `Dataset` exists it is
//! internally consistent and the rest of the pipeline has no error paths.
//! Whether a failure falls back to the demo dataset or is surfaced is the
//! caller's decision, not this module's.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Dataset, Record, COSTS, MARGIN, PROFIT, REVENUE, YEAR};

/// Columns every input must carry, matched case- and spelling-exact.
const REQUIRED: [&str; 3] = [YEAR, REVENUE, COSTS];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between raw bytes and a valid [`Dataset`].
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a top-level JSON array of row objects")]
    JsonShape,
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}, column '{column}': '{value}' is not numeric")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `Year`, `Revenue`, `Costs` (extra columns pass through)
/// * `.json` – records-oriented array with the same required keys
pub fn load_file(path: &Path) -> Result<Dataset, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let bytes = std::fs::read(path)?;
    match ext.as_str() {
        "csv" => parse_csv(&bytes),
        "json" => parse_json(&bytes),
        other => Err(IngestError::UnsupportedExtension(other.to_string())),
    }
}

/// The built-in dataset shown before any upload, and the fallback when an
/// upload cannot be parsed.
pub fn demo_dataset() -> Dataset {
    let revenue = [
        1000.0, 1050.0, 1102.0, 1158.0, 1216.0, 1276.0, 1340.0, 1407.0, 1477.0, 1551.0,
    ];
    let costs = [
        800.0, 824.0, 849.0, 874.0, 900.0, 927.0, 955.0, 984.0, 1013.0, 1044.0,
    ];

    let records = (2016..)
        .zip(revenue.into_iter().zip(costs))
        .map(|(year, (rev, cost))| Record::new(year, rev, cost, BTreeMap::new()))
        .collect();

    Dataset::from_rows(
        vec![YEAR.to_string(), REVENUE.to_string(), COSTS.to_string()],
        records,
    )
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Parse a UTF-8 CSV payload with a header row.
///
/// A header-only payload is a valid empty dataset. Row order is preserved.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    ensure_required_columns(|name| headers.iter().any(|h| h == name))?;

    // Present after the check above.
    let year_idx = headers.iter().position(|h| h == YEAR).unwrap();
    let revenue_idx = headers.iter().position(|h| h == REVENUE).unwrap();
    let costs_idx = headers.iter().position(|h| h == COSTS).unwrap();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let year = parse_year(record.get(year_idx).unwrap_or(""), row_no)?;
        let revenue = parse_number(record.get(revenue_idx).unwrap_or(""), row_no, REVENUE)?;
        let costs = parse_number(record.get(costs_idx).unwrap_or(""), row_no, COSTS)?;

        let mut extra = BTreeMap::new();
        for (col_idx, name) in headers.iter().enumerate() {
            if col_idx == year_idx || col_idx == revenue_idx || col_idx == costs_idx {
                continue;
            }
            // An input column named like a derived one is recomputed, not kept.
            if name == PROFIT || name == MARGIN {
                continue;
            }
            extra.insert(
                name.clone(),
                guess_cell_type(record.get(col_idx).unwrap_or("")),
            );
        }

        records.push(Record::new(year, revenue, costs, extra));
    }

    let input_columns = headers
        .into_iter()
        .filter(|h| h != PROFIT && h != MARGIN)
        .collect();
    Ok(Dataset::from_rows(input_columns, records))
}

fn parse_year(s: &str, row: usize) -> Result<i64, IngestError> {
    if let Ok(year) = s.parse::<i64>() {
        return Ok(year);
    }
    // Spreadsheets export integer years as "2020.0"; accept integral floats.
    if let Ok(f) = s.parse::<f64>() {
        if f.fract() == 0.0 {
            return Ok(f as i64);
        }
    }
    Err(IngestError::InvalidNumber {
        row,
        column: YEAR.to_string(),
        value: s.to_string(),
    })
}

fn parse_number(s: &str, row: usize, column: &str) -> Result<f64, IngestError> {
    s.parse::<f64>().map_err(|_| IngestError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON parser
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Year": 2020, "Revenue": 100.0, "Costs": 80.0, "Region": "EMEA" },
///   ...
/// ]
/// ```
pub fn parse_json(bytes: &[u8]) -> Result<Dataset, IngestError> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let rows = root.as_array().ok_or(IngestError::JsonShape)?;

    let mut input_columns: Vec<String> =
        vec![YEAR.to_string(), REVENUE.to_string(), COSTS.to_string()];
    let mut records = Vec::with_capacity(rows.len());

    for (row_no, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(IngestError::JsonShape)?;
        ensure_required_columns(|name| obj.contains_key(name))?;

        let year = json_year(&obj[YEAR], row_no)?;
        let revenue = json_number(&obj[REVENUE], row_no, REVENUE)?;
        let costs = json_number(&obj[COSTS], row_no, COSTS)?;

        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            if REQUIRED.contains(&key.as_str()) || key == PROFIT || key == MARGIN {
                continue;
            }
            if !input_columns.iter().any(|c| c == key) {
                input_columns.push(key.clone());
            }
            extra.insert(key.clone(), json_to_cell(val));
        }

        records.push(Record::new(year, revenue, costs, extra));
    }

    Ok(Dataset::from_rows(input_columns, records))
}

fn json_year(val: &JsonValue, row: usize) -> Result<i64, IngestError> {
    if let Some(year) = val.as_i64() {
        return Ok(year);
    }
    if let Some(f) = val.as_f64() {
        if f.fract() == 0.0 {
            return Ok(f as i64);
        }
    }
    Err(IngestError::InvalidNumber {
        row,
        column: YEAR.to_string(),
        value: val.to_string(),
    })
}

fn json_number(val: &JsonValue, row: usize, column: &str) -> Result<f64, IngestError> {
    val.as_f64().ok_or_else(|| IngestError::InvalidNumber {
        row,
        column: column.to_string(),
        value: val.to_string(),
    })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

fn ensure_required_columns(present: impl Fn(&str) -> bool) -> Result<(), IngestError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|name| !present(name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_derives_profit_and_margin() {
        let csv = "Year,Revenue,Costs\n2020,100,80\n2021,0,10\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].profit, 20.0);
        assert_eq!(ds.records[0].profit_margin_pct, 20.0);
        assert_eq!(ds.records[1].profit, -10.0);
        assert_eq!(ds.records[1].profit_margin_pct, 0.0);
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let csv = "Year,Revenue\n2020,100\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            IngestError::MissingColumns(missing) => assert_eq!(missing, vec![COSTS.to_string()]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn csv_headers_are_case_exact() {
        let csv = "year,revenue,costs\n2020,100,80\n";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(IngestError::MissingColumns(_))
        ));
    }

    #[test]
    fn csv_non_numeric_value_is_rejected() {
        let csv = "Year,Revenue,Costs\n2020,lots,80\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            IngestError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, REVENUE);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn csv_header_only_is_a_valid_empty_dataset() {
        let ds = parse_csv(b"Year,Revenue,Costs\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns, vec![YEAR, REVENUE, COSTS, PROFIT, MARGIN]);
    }

    #[test]
    fn csv_extra_columns_pass_through_in_order() {
        let csv = "Year,Region,Revenue,Costs\n2020,EMEA,100,80\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(ds.columns, vec![YEAR, "Region", REVENUE, COSTS, PROFIT, MARGIN]);
        assert_eq!(
            ds.records[0].extra.get("Region"),
            Some(&CellValue::String("EMEA".to_string()))
        );
    }

    #[test]
    fn csv_accepts_float_formatted_integral_year() {
        let csv = "Year,Revenue,Costs\n2020.0,100,80\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].year, 2020);

        let csv = "Year,Revenue,Costs\n2020.5,100,80\n";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(IngestError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn json_records_parse_like_csv() {
        let json = r#"[
            {"Year": 2020, "Revenue": 100.0, "Costs": 80.0, "Region": "EMEA"},
            {"Year": 2021, "Revenue": 0, "Costs": 10}
        ]"#;
        let ds = parse_json(json.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].profit, 20.0);
        assert_eq!(ds.records[1].profit_margin_pct, 0.0);
        assert_eq!(
            ds.records[0].extra.get("Region"),
            Some(&CellValue::String("EMEA".to_string()))
        );
    }

    #[test]
    fn json_requires_row_objects() {
        assert!(matches!(
            parse_json(b"[1, 2, 3]"),
            Err(IngestError::JsonShape)
        ));
        assert!(matches!(
            parse_json(br#"{"Year": 2020}"#),
            Err(IngestError::JsonShape)
        ));
    }

    #[test]
    fn demo_dataset_matches_fixed_series() {
        let ds = demo_dataset();

        assert_eq!(ds.len(), 10);
        assert_eq!(ds.year_span(), Some((2016, 2025)));
        assert_eq!(ds.records[0].revenue, 1000.0);
        assert_eq!(ds.records[0].profit, 200.0);
        assert_eq!(ds.records[0].profit_margin_pct, 20.0);
        assert_eq!(ds.records[9].revenue, 1551.0);
        assert_eq!(ds.records[9].costs, 1044.0);
    }
}
