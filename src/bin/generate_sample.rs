use std::path::Path;

use spendlens::data::generate::{Cadence, ColumnSpec, DatasetSpec, generate};
use spendlens::data::loader::save_json;
use spendlens::data::model::ColumnType;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let spec = DatasetSpec {
        model_id: "demo-retail-mmm".to_string(),
        rows: 104,
        cadence: Cadence::Weekly,
        date_column: "week".to_string(),
        columns: vec![
            ColumnSpec::Dimension {
                name: "region".to_string(),
                pool: vec![
                    "North".to_string(),
                    "South".to_string(),
                    "East".to_string(),
                    "West".to_string(),
                ],
            },
            ColumnSpec::Dimension {
                name: "channel".to_string(),
                pool: vec!["Search".to_string(), "Social".to_string(), "TV".to_string()],
            },
            ColumnSpec::Measure {
                name: "revenue".to_string(),
                column_type: ColumnType::Currency,
                min: 50_000.0,
                max: 120_000.0,
                trend_rate: 0.25,
                seasonal_amplitude: 0.15,
            },
            ColumnSpec::Measure {
                name: "search_spend".to_string(),
                column_type: ColumnType::Currency,
                min: 5_000.0,
                max: 20_000.0,
                trend_rate: 0.10,
                seasonal_amplitude: 0.10,
            },
            ColumnSpec::Measure {
                name: "tv_spend".to_string(),
                column_type: ColumnType::Currency,
                min: 10_000.0,
                max: 40_000.0,
                trend_rate: 0.0,
                seasonal_amplitude: 0.30,
            },
            ColumnSpec::Measure {
                name: "store_visits".to_string(),
                column_type: ColumnType::Integer,
                min: 800.0,
                max: 3_000.0,
                trend_rate: 0.15,
                seasonal_amplitude: 0.20,
            },
            ColumnSpec::Measure {
                name: "avg_temperature".to_string(),
                column_type: ColumnType::Decimal,
                min: -5.0,
                max: 28.0,
                trend_rate: 0.0,
                seasonal_amplitude: 0.0,
            },
        ],
    };

    let dataset = generate(&spec);

    let output_path = Path::new("sample_data.json");
    save_json(&dataset, output_path)?;

    println!(
        "Wrote {} rows x {} columns to {}",
        dataset.len(),
        dataset.columns.len(),
        output_path.display()
    );
    Ok(())
}
