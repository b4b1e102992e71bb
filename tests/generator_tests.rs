use spendlens::data::generate::{Cadence, ColumnSpec, DatasetSpec, generate};
use spendlens::data::model::{CellValue, ColumnType};

fn demo_spec(model_id: &str, rows: usize, cadence: Cadence) -> DatasetSpec {
    DatasetSpec {
        model_id: model_id.to_string(),
        rows,
        cadence,
        date_column: "date".to_string(),
        columns: vec![
            ColumnSpec::Dimension {
                name: "region".to_string(),
                pool: vec!["North".to_string(), "South".to_string(), "East".to_string()],
            },
            ColumnSpec::Measure {
                name: "revenue".to_string(),
                column_type: ColumnType::Currency,
                min: 1_000.0,
                max: 5_000.0,
                trend_rate: 0.2,
                seasonal_amplitude: 0.1,
            },
            ColumnSpec::Measure {
                name: "visits".to_string(),
                column_type: ColumnType::Integer,
                min: 100.0,
                max: 900.0,
                trend_rate: 0.0,
                seasonal_amplitude: 0.3,
            },
        ],
    }
}

#[test]
fn test_generation_is_reproducible() {
    let spec = demo_spec("model-a", 200, Cadence::Daily);
    let first = generate(&spec);
    let second = generate(&spec);
    assert_eq!(first, second, "same spec must generate identical datasets");
}

#[test]
fn test_different_model_ids_differ() {
    let a = generate(&demo_spec("model-a", 100, Cadence::Daily));
    let b = generate(&demo_spec("model-b", 100, Cadence::Daily));
    assert_ne!(a.rows, b.rows, "different seeds should change the numbers");
}

#[test]
fn test_generated_shape() {
    let dataset = generate(&demo_spec("model-a", 50, Cadence::Daily));
    assert_eq!(dataset.len(), 50);
    assert_eq!(dataset.columns, vec!["date", "region", "revenue", "visits"]);
    for row in &dataset.rows {
        assert_eq!(row.len(), dataset.columns.len(), "row arity must match");
    }
    assert_eq!(dataset.column_types["date"], ColumnType::Date);
    assert_eq!(dataset.column_types["region"], ColumnType::Text);
    assert_eq!(dataset.column_types["revenue"], ColumnType::Currency);
    assert_eq!(dataset.numeric_column_indices(), vec![2, 3]);
}

#[test]
fn test_date_axis_cadences() {
    let daily = generate(&demo_spec("m", 3, Cadence::Daily));
    assert_eq!(daily.rows[0][0], CellValue::Date("2024-01-01".to_string()));
    assert_eq!(daily.rows[2][0], CellValue::Date("2024-01-03".to_string()));

    let weekly = generate(&demo_spec("m", 3, Cadence::Weekly));
    assert_eq!(weekly.rows[1][0], CellValue::Date("2024-01-08".to_string()));

    let monthly = generate(&demo_spec("m", 3, Cadence::Monthly));
    assert_eq!(monthly.rows[1][0], CellValue::Date("2024-02-01".to_string()));
    assert_eq!(monthly.rows[2][0], CellValue::Date("2024-03-01".to_string()));
}

#[test]
fn test_dimension_assignment_is_cyclic() {
    let dataset = generate(&demo_spec("m", 7, Cadence::Daily));
    let expected = ["North", "South", "East", "North", "South", "East", "North"];
    for (row, want) in dataset.rows.iter().zip(expected) {
        assert_eq!(row[1], CellValue::Text(want.to_string()));
    }
}

#[test]
fn test_measure_values_are_shaped_and_rounded() {
    let dataset = generate(&demo_spec("m", 400, Cadence::Daily));
    let revenue = dataset.numeric_column(2);

    let non_null: Vec<f64> = revenue.iter().flatten().copied().collect();
    assert!(!non_null.is_empty());
    for v in &non_null {
        // Currency rounds to 2 decimals.
        assert!(
            ((v * 100.0).round() - v * 100.0).abs() < 1e-9,
            "currency cell {v} not rounded to cents"
        );
        // Uniform base in [1000, 5000), trend up to 1.2x, season within ±10%.
        assert!(*v >= 900.0 && *v <= 6_600.5, "cell {v} out of envelope");
    }

    let visits = dataset.numeric_column(3);
    for v in visits.iter().flatten() {
        assert_eq!(v.round(), *v, "integer cell {v} not whole");
    }
}

#[test]
fn test_null_injection_rate_is_plausible() {
    let dataset = generate(&demo_spec("m", 2_000, Cadence::Daily));
    let revenue = dataset.numeric_column(2);
    let nulls = revenue.iter().filter(|v| v.is_none()).count();
    let rate = nulls as f64 / revenue.len() as f64;
    assert!(
        rate > 0.01 && rate < 0.12,
        "null rate {rate} far from the 5% target"
    );
}

#[test]
fn test_colliding_column_names_are_skipped() {
    let mut spec = demo_spec("m", 20, Cadence::Daily);
    // Collides with the date axis.
    spec.columns.push(ColumnSpec::Measure {
        name: "date".to_string(),
        column_type: ColumnType::Currency,
        min: 0.0,
        max: 1.0,
        trend_rate: 0.0,
        seasonal_amplitude: 0.0,
    });
    // Repeats an earlier column.
    spec.columns.push(ColumnSpec::Dimension {
        name: "region".to_string(),
        pool: vec!["Duplicate".to_string()],
    });

    let dataset = generate(&spec);
    assert_eq!(
        dataset.columns,
        vec!["date", "region", "revenue", "visits"],
        "colliding columns must be dropped, not panic the generator"
    );
    assert_eq!(dataset.column_types["date"], ColumnType::Date);
    assert_eq!(dataset.rows[0][1], CellValue::Text("North".to_string()));
}

#[test]
fn test_categorical_measure_type_falls_back_to_decimal() {
    let mut spec = demo_spec("m", 20, Cadence::Daily);
    spec.columns.push(ColumnSpec::Measure {
        name: "mislabeled".to_string(),
        column_type: ColumnType::Text,
        min: 1.0,
        max: 2.0,
        trend_rate: 0.0,
        seasonal_amplitude: 0.0,
    });

    let dataset = generate(&spec);
    assert_eq!(dataset.column_types["mislabeled"], ColumnType::Decimal);
    let idx = dataset.columns.iter().position(|c| c == "mislabeled").unwrap();
    assert!(
        dataset.numeric_column(idx).iter().any(Option::is_some),
        "coerced measure must still generate numbers"
    );
}

#[test]
fn test_degenerate_specs_yield_valid_empty_datasets() {
    let empty_rows = generate(&demo_spec("m", 0, Cadence::Daily));
    assert!(empty_rows.is_empty());
    assert_eq!(empty_rows.columns.len(), 4);

    let no_columns = generate(&DatasetSpec {
        model_id: "m".to_string(),
        rows: 5,
        cadence: Cadence::Daily,
        date_column: "date".to_string(),
        columns: Vec::new(),
    });
    assert_eq!(no_columns.len(), 5);
    assert_eq!(no_columns.columns, vec!["date"]);
}
