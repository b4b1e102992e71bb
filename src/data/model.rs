use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ShapeError;

// ---------------------------------------------------------------------------
// ColumnType – declared type of one dataset column
// ---------------------------------------------------------------------------

/// Declared type of a dataset column.
///
/// `Date` and `Text` columns are categorical; the other three are
/// numeric-analyzable. Analytics functions never guess a column's type —
/// callers select columns through this declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Date,
    /// Free-form categorical text. Serialized as `"string"`.
    #[serde(rename = "string")]
    Text,
    Currency,
    Integer,
    Decimal,
}

impl ColumnType {
    /// Whether cells of this column carry analyzable numbers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ColumnType::Currency | ColumnType::Integer | ColumnType::Decimal
        )
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a dataset row
// ---------------------------------------------------------------------------

/// A dynamically-typed dataset cell. Any cell may be `Null` ("missing")
/// regardless of its column's declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Text(String),
    Null,
}

// -- Manual Eq/Ord so CellValue can live in BTreeSet (unique dimension values) --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Number(_) => 1,
                Text(_) => 2,
                Date(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric analytics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this cell is consistent with the declared column type.
    /// `Null` is allowed everywhere.
    fn matches(&self, ty: ColumnType) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Number(_) => ty.is_numeric(),
            CellValue::Date(_) => ty == ColumnType::Date,
            CellValue::Text(_) => ty == ColumnType::Text || ty == ColumnType::Date,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete tabular dataset
// ---------------------------------------------------------------------------

/// The full tabular dataset consumed by every analytics function.
///
/// Column order is significant: analytics take positional column indices.
/// A `Dataset` is built once (by the generator or the file loader) and
/// treated as immutable afterwards — no analytics function mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Ordered, unique column names.
    pub columns: Vec<String>,
    /// Declared type per column name.
    pub column_types: BTreeMap<String, ColumnType>,
    /// Row-major cell storage; every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, validating the structural invariants:
    /// unique column names, per-row arity, cell/declared-type consistency.
    ///
    /// Shape violations are programmer errors and fail fast; degenerate
    /// but well-shaped input (zero rows, zero columns) is fine.
    pub fn new(
        columns: Vec<String>,
        column_types: BTreeMap<String, ColumnType>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, ShapeError> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(ShapeError::DuplicateColumn { name: name.clone() });
            }
            if !column_types.contains_key(name) {
                return Err(ShapeError::MissingType { name: name.clone() });
            }
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ShapeError::RowArity {
                    row: row_idx,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (col_idx, cell) in row.iter().enumerate() {
                let ty = column_types[&columns[col_idx]];
                if !cell.matches(ty) {
                    return Err(ShapeError::TypeMismatch {
                        row: row_idx,
                        column: columns[col_idx].clone(),
                    });
                }
            }
        }
        Ok(Dataset {
            columns,
            column_types,
            rows,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Declared type of the column at `idx`, if the index is in range.
    pub fn column_type(&self, idx: usize) -> Option<ColumnType> {
        self.columns.get(idx).map(|name| self.column_types[name])
    }

    /// Extract one column as a sequence of nullable numbers, in row order.
    ///
    /// This is the common input shape for every numeric analytic. Cells
    /// that are null or non-numeric come back as `None`. Recomputed on
    /// demand; never cached here.
    pub fn numeric_column(&self, idx: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.get(idx).and_then(CellValue::as_f64))
            .collect()
    }

    /// Positional indices of all columns whose declared type is numeric.
    pub fn numeric_column_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| self.column_types[*name].is_numeric())
            .map(|(i, _)| i)
            .collect()
    }
}
