//! False-positive neighbourhood density estimation
//!
//! Candidate genes are mixed with the null exceedances, fold by fold, and
//! each candidate's K nearest neighbours are inspected: neighbours that came
//! from the null distribution are false-positive lookalikes. Averaging the
//! counts and densities over folds reduces the variance of the estimate.

use ndarray::{s, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::data::OrdensityParams;
use crate::distance::euclidean_distances;
use crate::threshold::NullExceedance;

/// Per-candidate neighbourhood statistics aggregated across folds
#[derive(Debug, Clone)]
pub struct NeighborhoodStats {
    /// Candidate gene index
    pub gene: usize,
    /// Minimum per-fold false-positive neighbour count
    pub fp_min: f64,
    /// Mean per-fold false-positive neighbour count (FP)
    pub fp_mean: f64,
    /// Maximum per-fold false-positive neighbour count
    pub fp_max: f64,
    /// Mean false-positive density (dFP)
    pub dfp: f64,
    /// Mean distance to the K-th nearest neighbour
    pub radius: f64,
}

/// Result of the estimator: per-candidate statistics (aligned with the
/// candidate order given to [`estimate_fp_density`]) and the expected
/// false-positive proportion `p0`.
#[derive(Debug, Clone)]
pub struct DensityEstimate {
    pub stats: Vec<NeighborhoodStats>,
    pub p0: f64,
}

/// Per-fold numbers for one candidate: (fp count, density, radius)
type FoldStats = (f64, f64, f64);

/// Estimate each candidate gene's false-positive neighbourhood density.
///
/// Null exceedances are assigned to one of `fold` folds by independent
/// uniform draws from a generator seeded at `base_seed + B`, a stream index
/// no permutation replicate uses, so fold assignment never perturbs the
/// null distribution draws. Folds are independent units; with `parallel`
/// set they run on the rayon pool and are collected back in fold order.
pub fn estimate_fp_density(
    candidate_features: &ArrayView2<f64>,
    candidate_genes: &[usize],
    exceedances: &[NullExceedance],
    params: &OrdensityParams,
    base_seed: u64,
) -> DensityEstimate {
    let n_cand = candidate_genes.len();
    debug_assert_eq!(candidate_features.nrows(), n_cand);

    if n_cand == 0 {
        return DensityEstimate {
            stats: Vec::new(),
            p0: 0.0,
        };
    }

    let n_folds = params.fold;
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(params.b as u64));
    let fold_of: Vec<usize> = exceedances
        .iter()
        .map(|_| rng.random_range(0..n_folds))
        .collect();

    let run_fold = |f: usize| -> Vec<FoldStats> {
        let members: Vec<&NullExceedance> = exceedances
            .iter()
            .zip(fold_of.iter())
            .filter(|(_, &fold)| fold == f)
            .map(|(e, _)| e)
            .collect();
        fold_statistics(candidate_features, &members, params.k)
    };

    let per_fold: Vec<Vec<FoldStats>> = if params.parallel {
        (0..n_folds).into_par_iter().map(run_fold).collect()
    } else {
        (0..n_folds).map(run_fold).collect()
    };

    // Expected share of null neighbours when candidates mix with one fold's
    // worth of exceedances
    let exc_per_fold = exceedances.len() as f64 / n_folds as f64;
    let p0 = exc_per_fold / (n_cand as f64 + exc_per_fold);

    let stats = candidate_genes
        .iter()
        .enumerate()
        .map(|(i, &gene)| {
            let mut fp_min = f64::INFINITY;
            let mut fp_max = f64::NEG_INFINITY;
            let mut fp_sum = 0.0;
            let mut density_sum = 0.0;
            let mut radius_sum = 0.0;
            for fold in &per_fold {
                let (fp, density, radius) = fold[i];
                fp_min = fp_min.min(fp);
                fp_max = fp_max.max(fp);
                fp_sum += fp;
                density_sum += density;
                radius_sum += radius;
            }
            let nf = n_folds as f64;
            NeighborhoodStats {
                gene,
                fp_min,
                fp_mean: fp_sum / nf,
                fp_max,
                dfp: density_sum / nf,
                radius: radius_sum / nf,
            }
        })
        .collect();

    DensityEstimate { stats, p0 }
}

/// KNN statistics for every candidate against one fold's combined set
fn fold_statistics(
    candidate_features: &ArrayView2<f64>,
    members: &[&NullExceedance],
    k: usize,
) -> Vec<FoldStats> {
    let n_cand = candidate_features.nrows();
    let n_probs = candidate_features.ncols();
    let n_total = n_cand + members.len();

    // Combined matrix: candidate rows first, then this fold's exceedances.
    // Rows at index >= n_cand are the null-labelled ones.
    let mut combined = Array2::zeros((n_total, n_probs));
    combined
        .slice_mut(s![..n_cand, ..])
        .assign(candidate_features);
    for (offset, member) in members.iter().enumerate() {
        combined.row_mut(n_cand + offset).assign(&member.features);
    }

    let distances = euclidean_distances(&combined.view());

    (0..n_cand)
        .map(|i| {
            let mut neighbours: Vec<(f64, bool)> = (0..n_total)
                .filter(|&j| j != i)
                .map(|j| (distances[[i, j]], j >= n_cand))
                .collect();
            neighbours
                .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            let k_eff = k.min(neighbours.len());
            if k_eff == 0 {
                return (0.0, 0.0, f64::NAN);
            }

            let fp = neighbours[..k_eff].iter().filter(|(_, null)| *null).count() as f64;
            let radius = neighbours[k_eff - 1].0;
            (fp, fp / radius, radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    fn exceedance(gene: usize, replicate: usize, features: Vec<f64>) -> NullExceedance {
        NullExceedance {
            gene,
            replicate,
            features: Array1::from_vec(features),
        }
    }

    fn single_fold_params(k: usize) -> OrdensityParams {
        OrdensityParams {
            fold: 1,
            k,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_null_neighbours() {
        // Candidate 0 sits at the origin surrounded by nulls; candidate 1 is
        // far away so it never enters candidate 0's neighbourhood.
        let candidates = array![[0.0, 0.0], [100.0, 100.0]];
        let exceedances = vec![
            exceedance(0, 0, vec![1.0, 0.0]),
            exceedance(1, 0, vec![0.0, 2.0]),
            exceedance(2, 1, vec![3.0, 0.0]),
            exceedance(0, 2, vec![0.0, 4.0]),
        ];

        let estimate = estimate_fp_density(
            &candidates.view(),
            &[5, 9],
            &exceedances,
            &single_fold_params(3),
            0,
        );

        let s = &estimate.stats[0];
        assert_eq!(s.gene, 5);
        // All 3 nearest neighbours are null exceedances
        assert_eq!(s.fp_mean, 3.0);
        assert_eq!(s.fp_min, 3.0);
        assert_eq!(s.fp_max, 3.0);
        // Radius is the 3rd nearest distance and dFP is exactly K / radius
        assert!((s.radius - 3.0).abs() < 1e-12);
        assert!((s.dfp - 3.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_p0_formula() {
        let candidates = array![[0.0, 0.0], [1.0, 1.0]];
        let exceedances = vec![
            exceedance(0, 0, vec![0.5, 0.5]),
            exceedance(1, 0, vec![0.2, 0.8]),
            exceedance(1, 1, vec![0.9, 0.1]),
            exceedance(0, 3, vec![0.4, 0.4]),
        ];
        let params = OrdensityParams {
            fold: 2,
            k: 2,
            ..Default::default()
        };

        let estimate = estimate_fp_density(&candidates.view(), &[0, 1], &exceedances, &params, 0);
        // p0 = (4/2) / (2 + 4/2) = 0.5
        assert!((estimate.p0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_exceedances_gives_zero_fp() {
        let candidates = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let estimate = estimate_fp_density(
            &candidates.view(),
            &[0, 1, 2],
            &[],
            &single_fold_params(2),
            0,
        );

        assert_eq!(estimate.p0, 0.0);
        for s in &estimate.stats {
            assert_eq!(s.fp_mean, 0.0);
            assert_eq!(s.dfp, 0.0);
            assert!(s.radius.is_finite());
        }
    }

    #[test]
    fn test_empty_candidates() {
        let candidates = Array2::<f64>::zeros((0, 2));
        let estimate = estimate_fp_density(
            &candidates.view(),
            &[],
            &[],
            &single_fold_params(2),
            0,
        );
        assert!(estimate.stats.is_empty());
        assert_eq!(estimate.p0, 0.0);
    }

    #[test]
    fn test_sequential_parallel_identical() {
        let candidates = array![[0.0, 0.0], [2.0, 1.0], [5.0, 5.0]];
        let exceedances: Vec<NullExceedance> = (0..10)
            .map(|i| exceedance(i % 3, i / 3, vec![i as f64 * 0.7, (10 - i) as f64 * 0.3]))
            .collect();

        let sequential = estimate_fp_density(
            &candidates.view(),
            &[0, 1, 2],
            &exceedances,
            &OrdensityParams {
                fold: 3,
                k: 4,
                parallel: false,
                ..Default::default()
            },
            42,
        );
        let parallel = estimate_fp_density(
            &candidates.view(),
            &[0, 1, 2],
            &exceedances,
            &OrdensityParams {
                fold: 3,
                k: 4,
                parallel: true,
                ..Default::default()
            },
            42,
        );

        for (s, p) in sequential.stats.iter().zip(parallel.stats.iter()) {
            assert_eq!(s.fp_mean, p.fp_mean);
            assert_eq!(s.dfp, p.dfp);
            assert_eq!(s.radius, p.radius);
        }
    }
}
