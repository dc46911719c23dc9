//! Significance cut-point from the pooled null OR distribution
//!
//! All genes x B null OR values form one pooled empirical distribution; the
//! cut-point is a single global percentile of it, not a per-gene quantile.

use ndarray::Array1;

use crate::permutation::NullReplicate;

/// A (gene, replicate) pair whose null OR score exceeds the cut-point.
/// Its feature vector feeds the false-positive density estimate.
#[derive(Debug, Clone)]
pub struct NullExceedance {
    pub gene: usize,
    pub replicate: usize,
    pub features: Array1<f64>,
}

/// Outcome of thresholding: the cut-point, the suspicious (candidate) gene
/// indices, and every null exceedance.
#[derive(Debug, Clone)]
pub struct ThresholdOutcome {
    pub cutoff: f64,
    pub suspicious: Vec<usize>,
    pub exceedances: Vec<NullExceedance>,
}

/// Select the cut-point and flag candidate genes.
///
/// The cut-point sits at 0-based rank `floor((1 - alpha) * genes * B)` of the
/// ascending sorted pooled null OR values (clamped to the last entry). A gene
/// is suspicious iff its real-data OR strictly exceeds the cut-point; the
/// same strict comparison tags the null exceedances.
pub fn select_threshold(
    real_or: &[f64],
    replicates: &[NullReplicate],
    alpha: f64,
) -> ThresholdOutcome {
    let mut pooled: Vec<f64> = replicates
        .iter()
        .flat_map(|rep| rep.or.iter().copied())
        .collect();
    pooled.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = ((1.0 - alpha) * pooled.len() as f64).floor() as usize;
    let cutoff = pooled[rank.min(pooled.len() - 1)];

    let suspicious: Vec<usize> = real_or
        .iter()
        .enumerate()
        .filter(|(_, &or)| or > cutoff)
        .map(|(gene, _)| gene)
        .collect();

    let mut exceedances = Vec::new();
    for (replicate, rep) in replicates.iter().enumerate() {
        for (gene, &or) in rep.or.iter().enumerate() {
            if or > cutoff {
                exceedances.push(NullExceedance {
                    gene,
                    replicate,
                    features: rep.features.row(gene).to_owned(),
                });
            }
        }
    }

    log::debug!(
        "Threshold {:.6}: {} suspicious genes, {} null exceedances",
        cutoff,
        suspicious.len(),
        exceedances.len()
    );

    ThresholdOutcome {
        cutoff,
        suspicious,
        exceedances,
    }
}
