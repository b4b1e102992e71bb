use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use super::model::{CellValue, ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – the dataset's own serialized form:
///   `{ "columns": [...], "column_types": {...}, "rows": [[...]] }`
/// * `.csv`  – header row with column names; column types inferred
///   (ISO date → date, all-integer → integer, numeric → decimal,
///   everything else → string); empty cells are missing values
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

/// Write a dataset to pretty-printed JSON in its serialized form.
pub fn save_json(dataset: &Dataset, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(dataset).context("serializing dataset")?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let dataset: Dataset = serde_json::from_str(&text).context("parsing JSON dataset")?;

    // `CellValue` is untagged, so every JSON string deserializes into the
    // same string variant; re-tag string cells from the declared column
    // type before validating.
    let Dataset {
        columns,
        column_types,
        rows,
    } = dataset;
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(idx, cell)| {
                    let ty = columns
                        .get(idx)
                        .and_then(|name| column_types.get(name).copied());
                    match (cell, ty) {
                        (CellValue::Date(s), Some(ColumnType::Text)) => CellValue::Text(s),
                        (CellValue::Text(s), Some(ColumnType::Date)) => CellValue::Date(s),
                        (cell, _) => cell,
                    }
                })
                .collect()
        })
        .collect();

    // Re-run structural validation: serde checks syntax, not shape.
    Dataset::new(columns, column_types, rows).context("validating JSON dataset")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != columns.len() {
            bail!(
                "CSV row {row_no} has {} fields, expected {}",
                record.len(),
                columns.len()
            );
        }
        raw_rows.push(record.iter().map(|s| s.trim().to_string()).collect());
    }

    let mut column_types = BTreeMap::new();
    for (idx, name) in columns.iter().enumerate() {
        let ty = infer_column_type(raw_rows.iter().map(|r| r[idx].as_str()));
        column_types.insert(name.clone(), ty);
    }

    let rows: Vec<Vec<CellValue>> = raw_rows
        .iter()
        .map(|raw| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, name)| parse_cell(&raw[idx], column_types[name]))
                .collect()
        })
        .collect();

    Dataset::new(columns, column_types, rows).context("validating CSV dataset")
}

/// Infer a column's type from its non-empty cells. Empty columns default
/// to `string`.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut saw_value = false;
    let mut all_dates = true;
    let mut all_integers = true;
    let mut all_numbers = true;

    for cell in cells.filter(|c| !c.is_empty()) {
        saw_value = true;
        all_dates &= NaiveDate::parse_from_str(cell, "%Y-%m-%d").is_ok();
        all_integers &= cell.parse::<i64>().is_ok();
        all_numbers &= cell.parse::<f64>().is_ok();
    }

    match (saw_value, all_dates, all_integers, all_numbers) {
        (false, ..) => ColumnType::Text,
        (true, true, _, _) => ColumnType::Date,
        (true, _, true, _) => ColumnType::Integer,
        (true, _, _, true) => ColumnType::Decimal,
        _ => ColumnType::Text,
    }
}

fn parse_cell(raw: &str, ty: ColumnType) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    match ty {
        ColumnType::Date => CellValue::Date(raw.to_string()),
        ColumnType::Text => CellValue::Text(raw.to_string()),
        ColumnType::Currency | ColumnType::Integer | ColumnType::Decimal => raw
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or(CellValue::Null),
    }
}
