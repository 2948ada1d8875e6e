use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{RawTable, UsageDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a usage dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` – first worksheet of the workbook, header row first
/// * `.csv`  – header row with column names
/// * `.json` – records-oriented array: `[{ "Username": ..., ... }, ...]`
///
/// Anything else is an [`LoadError::UnsupportedFormat`]; nothing downstream
/// runs for that file.
pub fn load_file(path: &Path) -> Result<UsageDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" => load_xlsx(path)?,
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    UsageDataset::from_raw(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one usage record per row.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: BTreeMap<String, String> = columns
            .iter()
            .zip(record.iter())
            .map(|(col, cell)| (col.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Username": "alice",
///     "Used Device Id": "DEV-0042",
///     "Used Device Model": "SM-T295",
///     "Area": "North",
///     "Region": "EMEA"
///   },
///   ...
/// ]
/// ```
///
/// The column set is the union of keys across records, in first-seen order;
/// a record lacking a key contributes an empty cell.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            row.insert(key.clone(), json_cell_to_text(val));
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn json_cell_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                number_to_text(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of an Excel workbook.  The first row is the
/// header; every cell is coerced to text.
fn load_xlsx(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).context("opening XLSX workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("XLSX workbook has no worksheets")?
        .context("reading first worksheet")?;

    let mut sheet_rows = range.rows();
    let columns: Vec<String> = sheet_rows
        .next()
        .context("XLSX worksheet is empty")?
        .iter()
        .map(xlsx_cell_to_text)
        .collect();

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let row: BTreeMap<String, String> = columns
            .iter()
            .zip(cells.iter())
            .map(|(col, cell)| (col.clone(), xlsx_cell_to_text(cell)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn xlsx_cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => number_to_text(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// -- shared helpers --

/// Integral numbers render without a trailing `.0` so device ids keep the
/// same text across formats.
fn number_to_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
