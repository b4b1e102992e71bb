use thiserror::Error;

/// Structural (shape) violations.
///
/// These are the only conditions the crate treats as hard errors: a row
/// whose arity disagrees with the column list, a ragged matrix handed to
/// PCA/k-means, and similar caller bugs. Degenerate statistical input
/// (empty columns, zero variance, short series) never errors — each
/// analytic degrades to a documented neutral result instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    #[error("column '{name}' has no declared type")]
    MissingType { name: String },

    #[error("row {row}, column '{column}': cell type disagrees with declared column type")]
    TypeMismatch { row: usize, column: String },

    #[error("matrix row {row} has {actual} values, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
