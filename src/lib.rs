//! spendlens – deterministic EDA analytics core for marketing
//! spend/response datasets.
//!
//! The crate turns a tabular dataset (mixed date/categorical/numeric
//! columns with missing values) into the numeric artifacts an exploratory
//! dashboard consumes: descriptive statistics, correlation/VIF,
//! autocorrelation structure, stationarity and change-point diagnostics,
//! PCA and k-means, saturation/adstock response fits, and feature ranking.
//! A seeded synthetic dataset generator produces reproducible inputs.
//!
//! Rendering, insight prose, and persistence live outside this crate; they
//! consume the plain result values exported here.

pub mod analytics;
pub mod data;

pub use analytics::describe::{StatSummary, correlation, describe, vif};
pub use analytics::rank::{FeatureImportance, feature_importance};
pub use analytics::reduce::{ClusterResult, PcaResult, kmeans, pca};
pub use analytics::response::{AdstockEstimate, SaturationFit, adstock_decay, saturation_curve};
pub use analytics::timeseries::{
    AdfTest, Decomposition, adf_test, autocorrelation, change_points, moving_average,
    partial_autocorrelation, rolling_zscore, seasonal_decomposition, select_period,
};
pub use data::error::ShapeError;
pub use data::generate::{Cadence, ColumnSpec, DatasetSpec, Mulberry32, generate};
pub use data::model::{CellValue, ColumnType, Dataset};
