use serde::{Deserialize, Serialize};

use super::timeseries::autocorrelation;

// ---------------------------------------------------------------------------
// Saturation curve: y = a * (1 - e^{-b x})
// ---------------------------------------------------------------------------

/// Fitted diminishing-returns curve `y = a * (1 - e^{-b x})`.
/// The all-zero default is the "could not fit" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaturationFit {
    pub a: f64,
    pub b: f64,
    pub r_squared: f64,
}

/// Fit the saturation curve by a 1-D grid search on `b`.
///
/// Candidate rates are `g / max(spend)` for `g = 0.1, 0.4, 0.7, ... <= 9.9`;
/// for each candidate the optimal `a` has the closed least-squares form
/// `a = sum(y * f) / sum(f^2)` against the basis `f(x) = 1 - e^{-b x}`.
/// The pair maximizing R-squared wins. Fewer than 3 points or a
/// non-positive spend/KPI maximum yields the zero fit.
pub fn saturation_curve(spend: &[f64], kpi: &[f64]) -> SaturationFit {
    let n = spend.len().min(kpi.len());
    if n < 3 {
        return SaturationFit::default();
    }
    let spend = &spend[..n];
    let kpi = &kpi[..n];

    let max_x = spend.iter().fold(0.0_f64, |m, &v| m.max(v));
    let max_y = kpi.iter().fold(0.0_f64, |m, &v| m.max(v));
    if max_x <= 0.0 || max_y <= 0.0 {
        return SaturationFit::default();
    }

    let mean_y = kpi.iter().sum::<f64>() / n as f64;
    let ss_tot: f64 = kpi.iter().map(|y| (y - mean_y).powi(2)).sum();

    let mut best: Option<SaturationFit> = None;
    let mut grid = 0.1;
    while grid <= 9.9 {
        let b = grid / max_x;
        let basis: Vec<f64> = spend.iter().map(|&x| 1.0 - (-b * x).exp()).collect();

        let sum_yf: f64 = kpi.iter().zip(&basis).map(|(y, f)| y * f).sum();
        let sum_ff: f64 = basis.iter().map(|f| f * f).sum();
        if sum_ff > 0.0 {
            let a = sum_yf / sum_ff;
            let ss_res: f64 = kpi
                .iter()
                .zip(&basis)
                .map(|(y, f)| (y - a * f).powi(2))
                .sum();
            let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };
            if best.as_ref().map_or(true, |f| r_squared > f.r_squared) {
                best = Some(SaturationFit { a, b, r_squared });
            }
        }
        grid += 0.3;
    }
    best.unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Adstock decay
// ---------------------------------------------------------------------------

/// Carryover estimate for an advertising spend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdstockEstimate {
    /// Per-period retention in `[0.01, 0.99]`.
    pub decay_rate: f64,
    /// Periods until half the effect remains; never below 0.5.
    pub half_life: f64,
}

/// Estimate adstock decay from the series' lag-1 autocorrelation.
///
/// A non-positive or unavailable lag-1 ACF falls back to a decay of 0.5;
/// the rate is clamped to `[0.01, 0.99]` and the half-life
/// `ln(0.5) / ln(rate)` floored at 0.5.
pub fn adstock_decay(values: &[f64], max_lag: usize) -> AdstockEstimate {
    let lag1 = autocorrelation(values, max_lag.max(1))
        .map(|acf| acf[1])
        .filter(|&r| r > 0.0)
        .unwrap_or(0.5);
    let decay_rate = lag1.clamp(0.01, 0.99);
    let half_life = (0.5_f64.ln() / decay_rate.ln()).max(0.5);

    AdstockEstimate {
        decay_rate,
        half_life,
    }
}
