use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use super::model::{CellValue, ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Minimal deterministic PRNG (mulberry32)
// ---------------------------------------------------------------------------

/// 32-bit integer-mixing PRNG. Holds its state as a plain value so several
/// datasets can be generated concurrently without interference.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Mulberry32 { state: seed }
    }

    /// Seed from a stable model identifier using the classic
    /// `h = 31*h + byte` string hash in wrapping 32-bit arithmetic.
    pub fn from_model_id(model_id: &str) -> Self {
        let mut h: u32 = 0;
        for b in model_id.bytes() {
            h = h.wrapping_mul(31).wrapping_add(u32::from(b));
        }
        Mulberry32::new(h)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) / (1.0 + f64::EPSILON)
    }

    /// Uniform draw between `min` and `max`. Half-open in floating point:
    /// `max` itself is never produced.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }
}

// ---------------------------------------------------------------------------
// Generation spec
// ---------------------------------------------------------------------------

/// Spacing of the synthetic date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

/// First date of every generated axis.
const EPOCH: &str = "2024-01-01";

/// Fraction of numeric cells independently replaced by `Null`.
const NULL_RATE: f64 = 0.05;

/// One column of the synthetic dataset.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    /// Categorical column filled by cycling through `pool` — deterministic,
    /// no PRNG draws.
    Dimension { name: String, pool: Vec<String> },
    /// Numeric column (KPI, spend, or control variable): uniform draws
    /// within the configured `[min, max]` range (the upper endpoint is a
    /// supremum, never drawn) shaped by a linear trend and a sinusoidal
    /// season.
    Measure {
        name: String,
        column_type: ColumnType,
        min: f64,
        max: f64,
        /// Total relative growth over the whole axis (e.g. 0.2 = +20%).
        trend_rate: f64,
        /// Relative amplitude of the seasonal cycle (four cycles per axis).
        seasonal_amplitude: f64,
    },
}

impl ColumnSpec {
    fn name(&self) -> &str {
        match self {
            ColumnSpec::Dimension { name, .. } | ColumnSpec::Measure { name, .. } => name,
        }
    }
}

/// Immutable description of a synthetic dataset: the seed source, the row
/// count, and the column layout. The same spec always generates the same
/// `Dataset`, byte for byte.
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    /// Stable identifier hashed into the PRNG seed.
    pub model_id: String,
    pub rows: usize,
    pub cadence: Cadence,
    /// Name of the leading date column.
    pub date_column: String,
    pub columns: Vec<ColumnSpec>,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generate a synthetic dataset from `spec`.
///
/// Generation never fails: a degenerate spec (zero rows or zero columns)
/// yields an empty but structurally valid dataset, and a sloppy one
/// (colliding column names, a categorical measure type) is normalized
/// rather than rejected. Measure cells are drawn
/// column-major (whole columns at a time) so the PRNG stream, and therefore
/// the output, is reproducible for a fixed spec.
pub fn generate(spec: &DatasetSpec) -> Dataset {
    let mut rng = Mulberry32::from_model_id(&spec.model_id);
    let n = spec.rows;
    let active = normalize_columns(spec);

    let mut columns = vec![spec.date_column.clone()];
    let mut column_types = BTreeMap::new();
    column_types.insert(spec.date_column.clone(), ColumnType::Date);
    for col in &active {
        columns.push(col.name().to_string());
        let ty = match col {
            ColumnSpec::Dimension { .. } => ColumnType::Text,
            ColumnSpec::Measure { column_type, .. } => *column_type,
        };
        column_types.insert(col.name().to_string(), ty);
    }

    // Build each column, then transpose into rows.
    let mut cols: Vec<Vec<CellValue>> = Vec::with_capacity(columns.len());
    cols.push(date_axis(n, spec.cadence));
    for col in &active {
        cols.push(match col {
            ColumnSpec::Dimension { pool, .. } => dimension_column(n, pool),
            ColumnSpec::Measure {
                column_type,
                min,
                max,
                trend_rate,
                seasonal_amplitude,
                ..
            } => measure_column(n, *column_type, *min, *max, *trend_rate, *seasonal_amplitude, &mut rng),
        });
    }

    let rows: Vec<Vec<CellValue>> = (0..n)
        .map(|i| cols.iter().map(|c| c[i].clone()).collect())
        .collect();

    log::debug!(
        "generated dataset '{}': {} rows x {} columns",
        spec.model_id,
        n,
        columns.len()
    );

    // The normalized layout above is correct by construction.
    Dataset::new(columns, column_types, rows)
        .unwrap_or_else(|e| unreachable!("generator produced invalid shape: {e}"))
}

/// Normalize a column layout so generation always succeeds: columns that
/// would collide with the date axis or an earlier column are skipped, and
/// a measure declared with a categorical type falls back to `Decimal`.
fn normalize_columns(spec: &DatasetSpec) -> Vec<ColumnSpec> {
    let mut active: Vec<ColumnSpec> = Vec::new();
    for col in &spec.columns {
        let name = col.name();
        if name == spec.date_column || active.iter().any(|c| c.name() == name) {
            log::warn!("skipping column '{name}': name already in use");
            continue;
        }
        active.push(match col {
            ColumnSpec::Measure {
                name,
                column_type,
                min,
                max,
                trend_rate,
                seasonal_amplitude,
            } if !column_type.is_numeric() => {
                log::warn!("measure '{name}' has a categorical type; generating decimal");
                ColumnSpec::Measure {
                    name: name.clone(),
                    column_type: ColumnType::Decimal,
                    min: *min,
                    max: *max,
                    trend_rate: *trend_rate,
                    seasonal_amplitude: *seasonal_amplitude,
                }
            }
            other => other.clone(),
        });
    }
    active
}

/// `count` consecutive dates from the fixed epoch at the given cadence.
fn date_axis(count: usize, cadence: Cadence) -> Vec<CellValue> {
    let epoch = NaiveDate::parse_from_str(EPOCH, "%Y-%m-%d")
        .unwrap_or_else(|_| unreachable!("fixed epoch is valid"));
    (0..count)
        .map(|i| {
            let date = match cadence {
                Cadence::Daily => epoch + chrono::Duration::days(i as i64),
                Cadence::Weekly => epoch + chrono::Duration::days(7 * i as i64),
                Cadence::Monthly => epoch + Months::new(i as u32),
            };
            CellValue::Date(date.format("%Y-%m-%d").to_string())
        })
        .collect()
}

/// Cyclic assignment from the value pool; an empty pool yields all-null.
fn dimension_column(count: usize, pool: &[String]) -> Vec<CellValue> {
    (0..count)
        .map(|i| {
            if pool.is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(pool[i % pool.len()].clone())
            }
        })
        .collect()
}

fn measure_column(
    count: usize,
    ty: ColumnType,
    min: f64,
    max: f64,
    trend_rate: f64,
    seasonal_amplitude: f64,
    rng: &mut Mulberry32,
) -> Vec<CellValue> {
    let n = count as f64;
    (0..count)
        .map(|i| {
            // One draw per cell for the null check, one more for the value.
            if rng.next_f64() < NULL_RATE {
                return CellValue::Null;
            }
            let base = rng.uniform(min, max);
            let trend = 1.0 + (i as f64 / n) * trend_rate;
            let season =
                1.0 + seasonal_amplitude * (2.0 * std::f64::consts::PI * i as f64 / (n / 4.0)).sin();
            let value = base * trend * season;
            let rounded = if ty == ColumnType::Currency {
                (value * 100.0).round() / 100.0
            } else {
                value.round()
            };
            CellValue::Number(rounded)
        })
        .collect()
}
