//! Robust outlyingness index (OR) from a pairwise distance matrix
//!
//! A gene whose typical distance to all other genes is large relative to the
//! global scale of the distance matrix receives a large OR score.
//! R equivalent: the OR index of ORdensity, built on the robust inlier index
//! I = vg / median(d_i)^2 of Arenas & Irigoien.

use ndarray::ArrayView2;

use crate::error::{OrdensityError, Result};
use crate::stats::median;

/// Compute the OR score for every row of a symmetric distance matrix.
///
/// The global robust scale is `vg = median(D)^2 / 2` over all matrix entries,
/// diagonal zeros included. For row `i`, the inlier index is
/// `I_i = vg / median(row_i)^2` (the row median also keeps the zero
/// self-distance) and the outlyingness score is `OR_i = 1 / I_i`.
///
/// A zero row median leaves `I_i` undefined; a zero `vg` makes every score
/// infinite. Both are data degeneracies and abort the run.
pub fn outlyingness_scores(distances: &ArrayView2<f64>) -> Result<Vec<f64>> {
    debug_assert_eq!(distances.nrows(), distances.ncols());

    let all: Vec<f64> = distances.iter().copied().collect();
    let global_median = median(&all);
    let vg = global_median * global_median / 2.0;

    if vg == 0.0 {
        return Err(OrdensityError::DegenerateDistances {
            reason: "global median pairwise distance is zero".to_string(),
        });
    }

    let n = distances.nrows();
    let mut scores = Vec::with_capacity(n);

    for i in 0..n {
        let row: Vec<f64> = distances.row(i).to_vec();
        let row_median = median(&row);
        if row_median == 0.0 {
            return Err(OrdensityError::DegenerateDistances {
                reason: format!("median distance of row {} is zero", i),
            });
        }
        // OR_i = 1 / I_i = median(row_i)^2 / vg
        scores.push(row_median * row_median / vg);
    }

    Ok(scores)
}
