use serde::{Deserialize, Serialize};

use crate::data::error::ShapeError;

// ---------------------------------------------------------------------------
// PCA via power iteration
// ---------------------------------------------------------------------------

/// Fixed number of power-iteration rounds per extracted component.
const POWER_ITERATIONS: usize = 100;

/// Principal components of a standardized matrix.
///
/// Eigenvalues come back in extraction order. Power iteration converges to
/// the dominant remaining direction, so this order tracks descending
/// eigenvalue order for well-conditioned input but is not guaranteed to for
/// near-degenerate covariance structure — treat it as approximate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PcaResult {
    /// Variance captured per extracted component.
    pub eigenvalues: Vec<f64>,
    /// Per input row, its coordinates on the extracted components.
    pub projections: Vec<Vec<f64>>,
}

/// Extract up to `min(n_components, p)` principal components from a
/// row-major matrix the caller has already centered/standardized.
///
/// The matrix is centered again defensively, the `p x p` covariance matrix
/// (divide by n-1) is deflated after each component so later iterations
/// find orthogonal directions. Fewer than 2 rows or 2 features yields the
/// empty result; a ragged matrix is a caller bug and errors.
pub fn pca(matrix: &[Vec<f64>], n_components: usize) -> Result<PcaResult, ShapeError> {
    check_rect(matrix)?;
    let n = matrix.len();
    let p = matrix.first().map_or(0, Vec::len);
    if n < 2 || p < 2 {
        return Ok(PcaResult::default());
    }

    // Center again; callers are expected to standardize but the covariance
    // below assumes zero column means.
    let means: Vec<f64> = (0..p)
        .map(|j| matrix.iter().map(|row| row[j]).sum::<f64>() / n as f64)
        .collect();
    let centered: Vec<Vec<f64>> = matrix
        .iter()
        .map(|row| row.iter().zip(&means).map(|(v, m)| v - m).collect())
        .collect();

    // p x p covariance, divide by n-1.
    let mut cov = vec![vec![0.0; p]; p];
    for row in &centered {
        for a in 0..p {
            for b in 0..p {
                cov[a][b] += row[a] * row[b];
            }
        }
    }
    for cov_row in &mut cov {
        for v in cov_row.iter_mut() {
            *v /= (n - 1) as f64;
        }
    }

    // Working copy mutated in place by deflation; never escapes this fn.
    let k = n_components.min(p);
    let mut eigenvalues = Vec::with_capacity(k);
    let mut eigenvectors: Vec<Vec<f64>> = Vec::with_capacity(k);

    for _ in 0..k {
        let (eigenvalue, vector) = power_iteration(&cov);
        // Deflate: cov -= lambda * v * v^T
        for a in 0..p {
            for b in 0..p {
                cov[a][b] -= eigenvalue * vector[a] * vector[b];
            }
        }
        eigenvalues.push(eigenvalue);
        eigenvectors.push(vector);
    }

    let projections = centered
        .iter()
        .map(|row| {
            eigenvectors
                .iter()
                .map(|v| row.iter().zip(v).map(|(x, e)| x * e).sum())
                .collect()
        })
        .collect();

    Ok(PcaResult {
        eigenvalues,
        projections,
    })
}

/// Dominant eigenpair of a symmetric matrix by fixed-round power iteration.
fn power_iteration(mat: &[Vec<f64>]) -> (f64, Vec<f64>) {
    let p = mat.len();
    let mut v = vec![1.0 / (p as f64).sqrt(); p];

    for _ in 0..POWER_ITERATIONS {
        let mut next: Vec<f64> = mat
            .iter()
            .map(|row| row.iter().zip(&v).map(|(m, x)| m * x).sum())
            .collect();
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            // Deflated to (numeric) zero: no variance left to extract.
            return (0.0, v);
        }
        for x in &mut next {
            *x /= norm;
        }
        v = next;
    }

    // Rayleigh quotient with a unit vector: lambda = v^T M v.
    let eigenvalue = mat
        .iter()
        .zip(&v)
        .map(|(row, vi)| vi * row.iter().zip(&v).map(|(m, x)| m * x).sum::<f64>())
        .sum();
    (eigenvalue, v)
}

// ---------------------------------------------------------------------------
// k-means clustering
// ---------------------------------------------------------------------------

/// Cluster assignment per input row plus the final centroids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    /// One cluster index (`0..k`) per row, in input order.
    pub assignments: Vec<usize>,
    /// `k` centroids, each of feature length.
    pub centroids: Vec<Vec<f64>>,
}

/// Lloyd's k-means with deterministic seeding: centroid `c` starts at row
/// `c * (n / k)`, clamped to the last row. Identical input always produces
/// identical clusters — no randomness anywhere.
///
/// Assignment ties go to the lowest cluster index; a cluster that loses all
/// members keeps an all-zero centroid for that iteration. Stops early once
/// assignments are stable, otherwise after `max_iter` rounds. With fewer
/// rows than clusters (or no features) every row lands in cluster 0 and no
/// centroids are returned.
pub fn kmeans(matrix: &[Vec<f64>], k: usize, max_iter: usize) -> Result<ClusterResult, ShapeError> {
    check_rect(matrix)?;
    let n = matrix.len();
    let p = matrix.first().map_or(0, Vec::len);
    if k == 0 || n < k || p == 0 {
        return Ok(ClusterResult {
            assignments: vec![0; n],
            centroids: Vec::new(),
        });
    }

    let stride = n / k;
    let mut centroids: Vec<Vec<f64>> = (0..k)
        .map(|c| matrix[(c * stride).min(n - 1)].clone())
        .collect();
    let mut assignments = vec![0usize; n];

    for _ in 0..max_iter {
        // Assign each row to its nearest centroid (squared Euclidean).
        let mut changed = false;
        for (i, row) in matrix.iter().enumerate() {
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let dist: f64 = row
                    .iter()
                    .zip(centroid)
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                if dist < best_dist {
                    best_dist = dist;
                    best = c;
                }
            }
            if assignments[i] != best {
                assignments[i] = best;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        // Recompute centroids as member means; empty clusters stay at zero.
        let mut sums = vec![vec![0.0; p]; k];
        let mut counts = vec![0usize; k];
        for (row, &c) in matrix.iter().zip(&assignments) {
            counts[c] += 1;
            for (s, v) in sums[c].iter_mut().zip(row) {
                *s += v;
            }
        }
        for (c, sum) in sums.iter_mut().enumerate() {
            if counts[c] > 0 {
                for v in sum.iter_mut() {
                    *v /= counts[c] as f64;
                }
            }
        }
        centroids = sums;
    }

    Ok(ClusterResult {
        assignments,
        centroids,
    })
}

/// All rows of a matrix must share the first row's length.
fn check_rect(matrix: &[Vec<f64>]) -> Result<(), ShapeError> {
    let expected = matrix.first().map_or(0, Vec::len);
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != expected {
            return Err(ShapeError::RaggedMatrix {
                row,
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(())
}
