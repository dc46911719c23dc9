//! Pairwise Euclidean distances between gene feature vectors
//!
//! The distance matrix is the workhorse of the pipeline: it is rebuilt for
//! the real split, once per permutation replicate, and once per fold during
//! density estimation. Callers should expect an O(n^2) allocation per call.

use ndarray::{Array2, ArrayView2};

/// Full symmetric pairwise Euclidean distance matrix over the rows of a
/// genes x features matrix. The diagonal is zero; the upper triangle is
/// computed once and mirrored.
pub fn euclidean_distances(features: &ArrayView2<f64>) -> Array2<f64> {
    debug_assert!(features.iter().all(|x| x.is_finite()));

    let n = features.nrows();
    let mut distances = Array2::zeros((n, n));

    for i in 0..n {
        let row_i = features.row(i);
        for j in (i + 1)..n {
            let row_j = features.row(j);
            let d: f64 = row_i
                .iter()
                .zip(row_j.iter())
                .map(|(&a, &b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }

    distances
}
