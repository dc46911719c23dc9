//! Result aggregation: the per-gene summary table and its ordering
//!
//! Candidates are ranked by DifExp ascending with OR descending as the
//! tie-break: a gene with fewer false-positive neighbours than chance
//! predicts, and a high outlyingness score, is the most convincing true
//! positive and sorts first.

use serde::{Deserialize, Serialize};

use crate::density::DensityEstimate;

/// One row of the summary table: a gene whose real-data OR exceeded the
/// permutation cut-point, with its neighbourhood statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateGene {
    /// Positional gene index in the input matrices
    pub gene_index: usize,
    /// Gene identifier from the input
    pub gene_id: String,
    /// Robust outlyingness score on the real split
    pub or: f64,
    /// Mean FP neighbour count minus the count expected under the null
    pub dif_exp: f64,
    /// Minimum per-fold false-positive neighbour count
    pub fp_min: f64,
    /// Mean false-positive neighbour count (FP)
    pub fp_mean: f64,
    /// Maximum per-fold false-positive neighbour count
    pub fp_max: f64,
    /// Mean false-positive density (dFP)
    pub dfp: f64,
    /// Mean distance to the K-th nearest neighbour
    pub radius: f64,
}

/// Full output of an ORdensity run: the ordered candidate table plus the
/// scalar metadata the reporting layer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdensityResult {
    /// Candidate genes, sorted by (DifExp ascending, OR descending)
    pub genes: Vec<CandidateGene>,
    /// Expected share of null neighbours in the mixed sample
    pub p0: f64,
    /// Configured neighbour count
    pub k: usize,
    /// OR cut-point derived from the null distribution
    pub cutoff: f64,
}

impl OrdensityResult {
    /// Assemble and sort the summary table.
    pub fn build(
        real_or: &[f64],
        gene_ids: &[String],
        estimate: &DensityEstimate,
        k: usize,
        cutoff: f64,
    ) -> Self {
        let expected_fp = estimate.p0 * k as f64;
        let mut genes: Vec<CandidateGene> = estimate
            .stats
            .iter()
            .map(|s| CandidateGene {
                gene_index: s.gene,
                gene_id: gene_ids[s.gene].clone(),
                or: real_or[s.gene],
                dif_exp: s.fp_mean - expected_fp,
                fp_min: s.fp_min,
                fp_mean: s.fp_mean,
                fp_max: s.fp_max,
                dfp: s.dfp,
                radius: s.radius,
            })
            .collect();
        sort_candidates(&mut genes);

        Self {
            genes,
            p0: estimate.p0,
            k,
            cutoff,
        }
    }

    /// Number of candidate genes
    pub fn candidate_count(&self) -> usize {
        self.genes.len()
    }

    /// OR scores aligned to summary row order
    pub fn or(&self) -> Vec<f64> {
        self.genes.iter().map(|g| g.or).collect()
    }

    /// Mean FP neighbour counts aligned to summary row order
    pub fn fp(&self) -> Vec<f64> {
        self.genes.iter().map(|g| g.fp_mean).collect()
    }

    /// Mean FP densities aligned to summary row order
    pub fn dfp(&self) -> Vec<f64> {
        self.genes.iter().map(|g| g.dfp).collect()
    }

    /// Expected false-positive neighbour count under the null, p0 * K
    pub fn expected_fp(&self) -> f64 {
        self.p0 * self.k as f64
    }

    /// Genes with no false-positive neighbours in any fold.
    /// R equivalent: the "strong" gene class of ORdensity's summary.
    pub fn strong_genes(&self) -> Vec<&CandidateGene> {
        self.genes.iter().filter(|g| g.fp_mean == 0.0).collect()
    }

    /// Genes with fewer false-positive neighbours than expected by chance.
    /// R equivalent: the "relaxed" gene class of ORdensity's summary.
    pub fn relaxed_genes(&self) -> Vec<&CandidateGene> {
        let expected = self.expected_fp();
        self.genes.iter().filter(|g| g.fp_mean < expected).collect()
    }

    /// Short human-readable report of the run outcome
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "ORdensity: {} candidate genes above OR cut-point {:.4}\n",
            self.candidate_count(),
            self.cutoff
        ));
        out.push_str(&format!(
            "Expected false-positive neighbours per gene (p0 * K): {:.4}\n",
            self.expected_fp()
        ));
        out.push_str(&format!(
            "Strong candidates (FP = 0): {}\n",
            self.strong_genes().len()
        ));
        out.push_str(&format!(
            "Relaxed candidates (FP < p0 * K): {}\n",
            self.relaxed_genes().len()
        ));
        out
    }
}

/// Stable sort by DifExp ascending, OR descending on ties
pub fn sort_candidates(genes: &mut [CandidateGene]) {
    genes.sort_by(|a, b| {
        a.dif_exp
            .partial_cmp(&b.dif_exp)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.or
                    .partial_cmp(&a.or)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}
