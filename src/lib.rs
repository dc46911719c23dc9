//! ORdensity: differential gene expression via robust outlyingness and
//! permutation-based false positive density
//!
//! This crate implements the ORdensity method for identifying genes whose
//! expression differs between two experimental conditions. Each gene's
//! condition-to-condition change is encoded as a weighted quantile-difference
//! vector; a robust, median-distance outlyingness index (OR) scores how far
//! each gene sits from the bulk; a permutation null distribution (random
//! repartitions of the pooled samples) supplies a significance cut-point; and
//! a K-nearest-neighbour estimate of false-positive density, averaged over
//! random folds, ranks the surviving candidates.
//!
//! # Example
//!
//! ```ignore
//! use ordensity::prelude::*;
//!
//! let positive = read_expression_matrix("treated.csv")?;
//! let negative = read_expression_matrix("control.csv")?;
//!
//! let params = OrdensityParams { seed: 42, ..Default::default() };
//! let result = run_ordensity(&positive, &negative, &params)?;
//!
//! println!("{}", result.summary());
//! for gene in result.strong_genes() {
//!     println!("{}\tOR={:.3}", gene.gene_id, gene.or);
//! }
//! ```

pub mod cli;
pub mod data;
pub mod density;
pub mod distance;
pub mod encoding;
pub mod error;
pub mod io;
pub mod outlyingness;
pub mod permutation;
pub mod stats;
pub mod summary;
pub mod threshold;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{ExpressionMatrix, OrdensityParams};
    pub use crate::error::{OrdensityError, Result};
    pub use crate::io::{read_expression_matrix, write_summary, write_summary_json};
    pub use crate::run_ordensity;
    pub use crate::summary::{CandidateGene, OrdensityResult};
}

use ndarray::Axis;

use crate::data::check_paired;
use crate::error::Result;
use crate::summary::OrdensityResult;

/// Run the complete ORdensity pipeline.
/// R equivalent: ORdensity() followed by findDEgenes() in the ORdensity package.
///
/// The two matrices hold the same genes row-by-row (positive = treated,
/// negative = control); the returned table covers exactly the genes whose
/// real-data OR exceeds the permutation cut-point, and is empty (not an
/// error) when no gene does.
pub fn run_ordensity(
    positive: &data::ExpressionMatrix,
    negative: &data::ExpressionMatrix,
    params: &data::OrdensityParams,
) -> Result<OrdensityResult> {
    params.validate()?;
    check_paired(positive, negative)?;

    log::info!(
        "ORdensity: {} genes, {}+{} samples, B={}, fold={}, K={}",
        positive.n_genes(),
        positive.n_samples(),
        negative.n_samples(),
        params.b,
        params.fold,
        params.k
    );

    // Real split: encoder -> distance -> outlyingness
    let features = encoding::quantile_difference_features(
        &positive.values(),
        &negative.values(),
        &params.probs,
        &params.weights,
        params.scale,
    )?;
    let distances = distance::euclidean_distances(&features.view());
    let real_or = outlyingness::outlyingness_scores(&distances.view())?;

    // Null distribution from B pooled repartitions
    let base_seed = permutation::resolve_base_seed(params);
    let replicates = permutation::generate_null_distribution(
        &positive.values(),
        &negative.values(),
        params,
        base_seed,
    )?;

    let outcome = threshold::select_threshold(&real_or, &replicates, params.alpha);
    log::info!(
        "Cut-point {:.4}: {} candidate genes, {} null exceedances",
        outcome.cutoff,
        outcome.suspicious.len(),
        outcome.exceedances.len()
    );

    let candidate_features = features.select(Axis(0), &outcome.suspicious);
    let estimate = density::estimate_fp_density(
        &candidate_features.view(),
        &outcome.suspicious,
        &outcome.exceedances,
        params,
        base_seed,
    );

    Ok(OrdensityResult::build(
        &real_or,
        positive.gene_ids(),
        &estimate,
        params.k,
        outcome.cutoff,
    ))
}
