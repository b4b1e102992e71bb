use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// StatSummary – descriptive statistics for one numeric column
// ---------------------------------------------------------------------------

/// Descriptive statistics over the non-null values of one column.
///
/// `std` is the population standard deviation (divide by n, not n-1);
/// quantiles use linear interpolation between order statistics; `kurtosis`
/// is excess kurtosis (fourth standardized moment minus 3). An all-null or
/// empty column yields the zero-filled default with `missing` set to the
/// column length — `count == 0` is the "no data" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Compute descriptive statistics for one nullable column.
pub fn describe(column: &[Option<f64>]) -> StatSummary {
    let values: Vec<f64> = column.iter().flatten().copied().collect();
    let missing = column.len() - values.len();
    if values.is_empty() {
        return StatSummary {
            missing,
            ..StatSummary::default()
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // Standardized moments are meaningless for a constant column.
    let (skewness, kurtosis) = if std > 0.0 {
        let m3 = values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / n;
        let m4 = values.iter().map(|v| ((v - mean) / std).powi(4)).sum::<f64>() / n;
        (m3, m4 - 3.0)
    } else {
        (0.0, 0.0)
    };

    StatSummary {
        count: values.len(),
        missing,
        mean,
        std,
        min: sorted[0],
        q1: quantile(&sorted, 25.0),
        median: quantile(&sorted, 50.0),
        q3: quantile(&sorted, 75.0),
        max: sorted[sorted.len() - 1],
        skewness,
        kurtosis,
    }
}

/// Linear-interpolated percentile of a sorted slice: `idx = p/100 * (n-1)`.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let idx = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

// ---------------------------------------------------------------------------
// Correlation and multicollinearity
// ---------------------------------------------------------------------------

/// Pearson correlation over the index-aligned subset where both columns
/// are non-null.
///
/// Returns `None` when fewer than 3 paired observations exist or either
/// variance is zero — "no evidence of correlation" rather than an error.
/// Callers wanting the neutral numeric form use `.unwrap_or(0.0)`.
pub fn correlation(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

/// Variance inflation factors for the columns at `column_indices`.
///
/// R² for each target is approximated by the mean of its squared pairwise
/// correlations with the other columns in the set (not a true multiple
/// regression). R² is clamped to 0.99 before inversion so VIF stays
/// finite; degenerate pairs contribute zero correlation. Fewer than two
/// columns means no multicollinearity to measure: all VIFs are 1.
pub fn vif(dataset: &Dataset, column_indices: &[usize]) -> Vec<f64> {
    if column_indices.len() < 2 {
        return vec![1.0; column_indices.len()];
    }

    let columns: Vec<Vec<Option<f64>>> = column_indices
        .iter()
        .map(|&idx| dataset.numeric_column(idx))
        .collect();

    columns
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let mut sum_r2 = 0.0;
            let mut others = 0usize;
            for (j, other) in columns.iter().enumerate() {
                if i == j {
                    continue;
                }
                let r = correlation(target, other).unwrap_or(0.0);
                sum_r2 += r * r;
                others += 1;
            }
            if others == 0 {
                return 1.0;
            }
            let r_squared = (sum_r2 / others as f64).min(0.99);
            1.0 / (1.0 - r_squared)
        })
        .collect()
}
