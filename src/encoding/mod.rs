//! Quantile-difference encoding of condition-to-condition expression changes
//!
//! Each gene's change between the two conditions is summarised as a weighted
//! vector of quantile differences, one entry per probability level.
//! R equivalent: the internal quantile-difference preprocessing of
//! ORdensity::ORdensity().

use ndarray::{Array2, ArrayView2};

use crate::error::{OrdensityError, Result};
use crate::stats::quantiles;

/// Encode per-gene quantile differences between two sample groups.
///
/// For gene `g` and probability level `p`, the raw feature is
/// `quantile(positive_row_g, p) - quantile(negative_row_g, p)`.
/// With `scale` set, each gene's difference vector is divided by
/// `max(IQR_positive, IQR_negative)` where the IQR spans the first and last
/// entries of `probs`; a zero max IQR aborts the run. Finally each column is
/// multiplied by the matching weight.
///
/// Returns a genes x probs feature matrix.
pub fn quantile_difference_features(
    positive: &ArrayView2<f64>,
    negative: &ArrayView2<f64>,
    probs: &[f64],
    weights: &[f64],
    scale: bool,
) -> Result<Array2<f64>> {
    debug_assert_eq!(positive.nrows(), negative.nrows());
    debug_assert_eq!(probs.len(), weights.len());

    let n_genes = positive.nrows();
    let n_probs = probs.len();
    let mut features = Array2::zeros((n_genes, n_probs));

    for gene in 0..n_genes {
        let pos_row: Vec<f64> = positive.row(gene).to_vec();
        let neg_row: Vec<f64> = negative.row(gene).to_vec();

        let pos_q = quantiles(&pos_row, probs);
        let neg_q = quantiles(&neg_row, probs);

        let mut diffs: Vec<f64> = pos_q
            .iter()
            .zip(neg_q.iter())
            .map(|(&p, &n)| p - n)
            .collect();

        if scale {
            // IQR from the first and last listed probability levels
            let iqr_pos = pos_q[n_probs - 1] - pos_q[0];
            let iqr_neg = neg_q[n_probs - 1] - neg_q[0];
            let s = iqr_pos.max(iqr_neg);
            if s == 0.0 {
                return Err(OrdensityError::DegenerateScale { gene_index: gene });
            }
            for d in diffs.iter_mut() {
                *d /= s;
            }
        }

        for (j, (&d, &w)) in diffs.iter().zip(weights.iter()).enumerate() {
            features[[gene, j]] = d * w;
        }
    }

    Ok(features)
}
