use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Smoothing and decomposition
// ---------------------------------------------------------------------------

/// Centered moving average. The window is symmetric around each index and
/// shrinks at the series boundaries — no padding.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            values[start..end].iter().sum::<f64>() / (end - start) as f64
        })
        .collect()
}

/// Additive trend/seasonal/residual split of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Additive seasonal decomposition.
///
/// Trend is a centered moving average with window `min(period, n)`;
/// the seasonal component is the mean detrended value per position modulo
/// `period`, broadcast back over the series; the residual is what remains.
/// `period` is clamped to at least 1.
pub fn seasonal_decomposition(values: &[f64], period: usize) -> Decomposition {
    let n = values.len();
    let period = period.max(1);
    let trend = moving_average(values, period.min(n.max(1)));

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for i in 0..n {
        sums[i % period] += values[i] - trend[i];
        counts[i % period] += 1;
    }
    let means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let seasonal: Vec<f64> = (0..n).map(|i| means[i % period]).collect();
    let residual: Vec<f64> = (0..n)
        .map(|i| values[i] - trend[i] - seasonal[i])
        .collect();

    Decomposition {
        trend,
        seasonal,
        residual,
    }
}

/// Pick the candidate period with the strongest seasonal signal, measured
/// as the ratio of seasonal std to the series' own std. Candidates at or
/// above half the series length are skipped; `None` when nothing qualifies
/// or the series is constant.
pub fn select_period(values: &[f64], candidates: &[usize]) -> Option<usize> {
    let series_std = population_std(values);
    if series_std == 0.0 {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for &period in candidates {
        if period == 0 || period * 2 >= values.len() {
            continue;
        }
        let decomp = seasonal_decomposition(values, period);
        let strength = population_std(&decomp.seasonal) / series_std;
        if best.map_or(true, |(_, s)| strength > s) {
            best = Some((period, strength));
        }
    }
    best.map(|(period, _)| period)
}

// ---------------------------------------------------------------------------
// Autocorrelation structure
// ---------------------------------------------------------------------------

/// Sample autocorrelation at lags `0..=max_lag`, normalized by the lag-0
/// sum of squares so `acf[0] == 1`.
///
/// `None` when the series is shorter than `max_lag + 1` or constant —
/// the neutral all-zero vector would otherwise be indistinguishable from
/// a genuinely uncorrelated series.
pub fn autocorrelation(values: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let n = values.len();
    if n < max_lag + 1 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let c0: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if c0 == 0.0 {
        return None;
    }

    Some(
        (0..=max_lag)
            .map(|lag| {
                let ck: f64 = (lag..n)
                    .map(|t| (values[t] - mean) * (values[t - lag] - mean))
                    .sum();
                ck / c0
            })
            .collect(),
    )
}

/// Partial autocorrelation at lags `0..=max_lag` via the Durbin–Levinson
/// recursion seeded from the ACF. `pacf[0] == 1`; a degenerate denominator
/// at some order yields zero for that order.
pub fn partial_autocorrelation(values: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let acf = autocorrelation(values, max_lag)?;
    let mut pacf = vec![0.0; max_lag + 1];
    pacf[0] = 1.0;
    if max_lag == 0 {
        return Some(pacf);
    }

    // phi[j] holds the order-k AR coefficients, 1-indexed by lag.
    let mut phi = vec![0.0; max_lag + 1];
    phi[1] = acf[1];
    pacf[1] = acf[1];

    for k in 2..=max_lag {
        let mut num = acf[k];
        let mut den = 1.0;
        for j in 1..k {
            num -= phi[j] * acf[k - j];
            den -= phi[j] * acf[j];
        }
        let phi_kk = if den == 0.0 { 0.0 } else { num / den };
        pacf[k] = phi_kk;

        let prev = phi.clone();
        for j in 1..k {
            phi[j] = prev[j] - phi_kk * prev[k - j];
        }
        phi[k] = phi_kk;
    }
    Some(pacf)
}

// ---------------------------------------------------------------------------
// Stationarity (simplified ADF)
// ---------------------------------------------------------------------------

/// Outcome of the simplified augmented Dickey–Fuller test. The default
/// value (`statistic 0, p_value 1, stationary false`) doubles as the
/// "series too short" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdfTest {
    pub statistic: f64,
    pub p_value: f64,
    pub stationary: bool,
}

impl Default for AdfTest {
    fn default() -> Self {
        AdfTest {
            statistic: 0.0,
            p_value: 1.0,
            stationary: false,
        }
    }
}

/// Simplified ADF stationarity test: regress first differences on the
/// lagged level (single lag, no higher-order augmentation) and take the
/// t-statistic of the slope.
///
/// The 5% critical value (-2.86) is applied uniformly regardless of n,
/// and the p-value is a coarse step lookup rather than a proper tail
/// probability — kept as-is for compatibility with the dashboards that
/// consume these numbers. Requires at least 10 observations.
pub fn adf_test(values: &[f64]) -> AdfTest {
    let n = values.len();
    if n < 10 {
        return AdfTest::default();
    }

    // y_{t-1} against dy_t = y_t - y_{t-1}
    let x: Vec<f64> = values[..n - 1].to_vec();
    let dy: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let m = x.len() as f64;

    let mean_x = x.iter().sum::<f64>() / m;
    let mean_dy = dy.iter().sum::<f64>() / m;
    let sxx: f64 = x.iter().map(|v| (v - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return AdfTest::default();
    }
    let sxy: f64 = x
        .iter()
        .zip(&dy)
        .map(|(xv, yv)| (xv - mean_x) * (yv - mean_dy))
        .sum();

    let slope = sxy / sxx;
    let intercept = mean_dy - slope * mean_x;

    let sse: f64 = x
        .iter()
        .zip(&dy)
        .map(|(xv, yv)| (yv - intercept - slope * xv).powi(2))
        .sum();
    let dof = m - 2.0;
    if dof <= 0.0 || sse == 0.0 {
        return AdfTest::default();
    }
    let se = (sse / dof / sxx).sqrt();
    let statistic = slope / se;

    let p_value = match statistic {
        t if t < -3.43 => 0.01,
        t if t < -2.86 => 0.05,
        t if t < -2.57 => 0.10,
        _ => 0.50,
    };

    AdfTest {
        statistic,
        p_value,
        stationary: statistic < -2.86,
    }
}

// ---------------------------------------------------------------------------
// Change points and anomalies
// ---------------------------------------------------------------------------

/// Windowed mean-difference change-point detector.
///
/// Window size is `max(5, n/10)`. Each interior index compares the mean of
/// the `window` points before against the `window` points after, normalized
/// by the global population std; an index is flagged when that gap reaches
/// `threshold` and it lies more than `window` positions past the previously
/// flagged point (suppresses clustered detections). Fewer than 10 points or
/// a constant series yields no detections.
pub fn change_points(values: &[f64], threshold: f64) -> Vec<usize> {
    let n = values.len();
    if n < 10 {
        return Vec::new();
    }
    let std = population_std(values);
    if std == 0.0 {
        return Vec::new();
    }

    let window = (n / 10).max(5);
    let mut detected = Vec::new();
    let mut last: Option<usize> = None;

    for i in window..=n.saturating_sub(window) {
        let before = mean(&values[i - window..i]);
        let after = mean(&values[i..i + window]);
        let gap = (after - before).abs() / std;
        if gap >= threshold && last.map_or(true, |l| i - l > window) {
            detected.push(i);
            last = Some(i);
        }
    }
    detected
}

/// Rolling z-score over a trailing (causal) window of `window + 1` values,
/// growing near the start of the series. Zero wherever the window std is 0.
pub fn rolling_zscore(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window);
            let slice = &values[start..=i];
            let m = mean(slice);
            let std = population_std(slice);
            if std == 0.0 {
                0.0
            } else {
                (values[i] - m) / std
            }
        })
        .collect()
}

// -- small numeric helpers --

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}
