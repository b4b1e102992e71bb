use serde::{Deserialize, Serialize};

use super::describe::correlation;
use crate::data::model::Dataset;

/// One column's correlation-based importance against the target KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

/// Rank every other numeric-typed column by `|correlation|` with the
/// target column, sorted descending and normalized so the importances sum
/// to 1. Normalization is skipped when every correlation is zero, leaving
/// the raw zeros in place.
pub fn feature_importance(dataset: &Dataset, target_idx: usize) -> Vec<FeatureImportance> {
    let target = dataset.numeric_column(target_idx);

    let mut scores: Vec<FeatureImportance> = dataset
        .numeric_column_indices()
        .into_iter()
        .filter(|&idx| idx != target_idx)
        .map(|idx| {
            let column = dataset.numeric_column(idx);
            FeatureImportance {
                name: dataset.columns[idx].clone(),
                importance: correlation(&column, &target).unwrap_or(0.0).abs(),
            }
        })
        .collect();

    scores.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    let total: f64 = scores.iter().map(|s| s.importance).sum();
    if total > 0.0 {
        for score in &mut scores {
            score.importance /= total;
        }
    }
    scores
}
