use std::collections::BTreeMap;

use spendlens::data::error::ShapeError;
use spendlens::data::model::{CellValue, ColumnType, Dataset};

fn types(pairs: &[(&str, ColumnType)]) -> BTreeMap<String, ColumnType> {
    pairs.iter().map(|(n, t)| (n.to_string(), *t)).collect()
}

#[test]
fn test_valid_dataset_construction() {
    let dataset = Dataset::new(
        vec!["date".to_string(), "spend".to_string()],
        types(&[("date", ColumnType::Date), ("spend", ColumnType::Currency)]),
        vec![
            vec![
                CellValue::Date("2024-01-01".to_string()),
                CellValue::Number(120.5),
            ],
            vec![CellValue::Date("2024-01-02".to_string()), CellValue::Null],
        ],
    )
    .expect("well-shaped dataset");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.column_type(1), Some(ColumnType::Currency));
    assert_eq!(dataset.numeric_column(1), vec![Some(120.5), None]);
}

#[test]
fn test_row_arity_violation_fails_fast() {
    let err = Dataset::new(
        vec!["a".to_string(), "b".to_string()],
        types(&[("a", ColumnType::Decimal), ("b", ColumnType::Decimal)]),
        vec![vec![CellValue::Number(1.0)]],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ShapeError::RowArity {
            row: 0,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_duplicate_column_rejected() {
    let err = Dataset::new(
        vec!["x".to_string(), "x".to_string()],
        types(&[("x", ColumnType::Decimal)]),
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ShapeError::DuplicateColumn { .. }));
}

#[test]
fn test_cell_type_mismatch_rejected() {
    let err = Dataset::new(
        vec!["spend".to_string()],
        types(&[("spend", ColumnType::Currency)]),
        vec![vec![CellValue::Text("not a number".to_string())]],
    )
    .unwrap_err();
    assert!(matches!(err, ShapeError::TypeMismatch { row: 0, .. }));
}

#[test]
fn test_null_is_allowed_in_any_column() {
    let dataset = Dataset::new(
        vec!["region".to_string(), "kpi".to_string()],
        types(&[("region", ColumnType::Text), ("kpi", ColumnType::Integer)]),
        vec![vec![CellValue::Null, CellValue::Null]],
    );
    assert!(dataset.is_ok(), "null cells pass every declared type");
}

#[test]
fn test_empty_dataset_is_valid() {
    let dataset = Dataset::new(Vec::new(), BTreeMap::new(), Vec::new()).expect("empty is fine");
    assert!(dataset.is_empty());
    assert!(dataset.numeric_column_indices().is_empty());
}

#[test]
fn test_numeric_column_indices_filter_by_declared_type() {
    let dataset = Dataset::new(
        vec!["date".to_string(), "region".to_string(), "kpi".to_string()],
        types(&[
            ("date", ColumnType::Date),
            ("region", ColumnType::Text),
            ("kpi", ColumnType::Decimal),
        ]),
        Vec::new(),
    )
    .unwrap();
    assert_eq!(dataset.numeric_column_indices(), vec![2]);
}
