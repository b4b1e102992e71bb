use spendlens::analytics::reduce::{kmeans, pca};
use spendlens::data::error::ShapeError;
use spendlens::data::generate::Mulberry32;

fn correlated_cloud(n: usize) -> Vec<Vec<f64>> {
    let mut rng = Mulberry32::new(99);
    (0..n)
        .map(|_| {
            let t = rng.next_f64() * 10.0;
            let jitter = rng.next_f64() - 0.5;
            vec![t, 2.0 * t + jitter, -t + jitter]
        })
        .collect()
}

fn covariance_trace(matrix: &[Vec<f64>]) -> f64 {
    let n = matrix.len();
    let p = matrix[0].len();
    (0..p)
        .map(|j| {
            let mean = matrix.iter().map(|r| r[j]).sum::<f64>() / n as f64;
            matrix.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        })
        .sum()
}

#[test]
fn test_pca_eigenvalues_bounded_by_trace() {
    let matrix = correlated_cloud(80);
    let result = pca(&matrix, 3).unwrap();

    assert_eq!(result.eigenvalues.len(), 3);
    for ev in &result.eigenvalues {
        assert!(*ev >= -1e-9, "eigenvalue {ev} negative");
    }
    let total: f64 = result.eigenvalues.iter().sum();
    let trace = covariance_trace(&matrix);
    assert!(
        total <= trace + 1e-6,
        "extracted variance {total} exceeds covariance trace {trace}"
    );
}

#[test]
fn test_pca_dominant_component_captures_linear_structure() {
    // Columns are near-exact linear functions of one factor, so almost all
    // variance lives on the first extracted component.
    let matrix = correlated_cloud(120);
    let result = pca(&matrix, 3).unwrap();
    let total: f64 = result.eigenvalues.iter().sum();
    assert!(
        result.eigenvalues[0] / total > 0.95,
        "first component share too small: {:?}",
        result.eigenvalues
    );
}

#[test]
fn test_pca_projections_shape() {
    let matrix = correlated_cloud(40);
    let result = pca(&matrix, 2).unwrap();
    assert_eq!(result.projections.len(), 40);
    assert!(result.projections.iter().all(|p| p.len() == 2));
}

#[test]
fn test_pca_component_count_clamped_to_features() {
    let matrix = correlated_cloud(20);
    let result = pca(&matrix, 10).unwrap();
    assert_eq!(result.eigenvalues.len(), 3, "no more components than features");
}

#[test]
fn test_pca_degenerate_input_is_empty() {
    let one_row = vec![vec![1.0, 2.0, 3.0]];
    assert!(pca(&one_row, 2).unwrap().eigenvalues.is_empty());

    let one_feature = vec![vec![1.0], vec![2.0], vec![3.0]];
    assert!(pca(&one_feature, 2).unwrap().eigenvalues.is_empty());
}

#[test]
fn test_pca_rejects_ragged_matrix() {
    let ragged = vec![vec![1.0, 2.0], vec![3.0]];
    let err = pca(&ragged, 1).unwrap_err();
    assert_eq!(
        err,
        ShapeError::RaggedMatrix {
            row: 1,
            expected: 2,
            actual: 1
        }
    );
}

fn two_blobs() -> Vec<Vec<f64>> {
    let mut rows = Vec::new();
    let mut rng = Mulberry32::new(5);
    for _ in 0..25 {
        rows.push(vec![rng.next_f64(), rng.next_f64()]);
    }
    for _ in 0..25 {
        rows.push(vec![10.0 + rng.next_f64(), 10.0 + rng.next_f64()]);
    }
    rows
}

#[test]
fn test_kmeans_is_deterministic() {
    let matrix = two_blobs();
    let first = kmeans(&matrix, 2, 50).unwrap();
    let second = kmeans(&matrix, 2, 50).unwrap();
    assert_eq!(first.assignments, second.assignments);
    assert_eq!(first.centroids, second.centroids);
}

#[test]
fn test_kmeans_separates_obvious_blobs() {
    let matrix = two_blobs();
    let result = kmeans(&matrix, 2, 50).unwrap();

    assert_eq!(result.assignments.len(), 50);
    assert_eq!(result.centroids.len(), 2);

    let first_cluster = result.assignments[0];
    assert!(
        result.assignments[..25].iter().all(|&c| c == first_cluster),
        "first blob split across clusters"
    );
    assert!(
        result.assignments[25..].iter().all(|&c| c != first_cluster),
        "second blob merged into the first"
    );
}

#[test]
fn test_kmeans_fewer_rows_than_clusters() {
    let matrix = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let result = kmeans(&matrix, 5, 50).unwrap();
    assert_eq!(result.assignments, vec![0, 0]);
    assert!(result.centroids.is_empty());
}

#[test]
fn test_kmeans_rejects_ragged_matrix() {
    let ragged = vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]];
    assert!(matches!(
        kmeans(&ragged, 2, 50),
        Err(ShapeError::RaggedMatrix { row: 1, .. })
    ));
}
