//! Run configuration for the ORdensity pipeline

use crate::error::{OrdensityError, Result};

/// Immutable parameters controlling one ORdensity run.
/// R equivalent: the arguments of ORdensity::ORdensity(); defaults match.
#[derive(Debug, Clone)]
pub struct OrdensityParams {
    /// Number of permutation replicates used to build the null distribution
    pub b: usize,
    /// Divide each gene's quantile differences by its max interquartile range
    pub scale: bool,
    /// Significance level for the null cut-point
    pub alpha: f64,
    /// Number of folds the null exceedances are split into for density estimation
    pub fold: usize,
    /// Quantile probability levels, strictly increasing within (0, 1)
    pub probs: Vec<f64>,
    /// Weight applied to each quantile difference; same length as `probs`
    pub weights: Vec<f64>,
    /// Number of nearest neighbours inspected per candidate gene
    pub k: usize,
    /// Run replicates and folds on the rayon thread pool
    pub parallel: bool,
    /// Derive every random draw deterministically from `seed`
    pub replicable: bool,
    /// Base seed for replicable runs
    pub seed: u64,
}

impl Default for OrdensityParams {
    fn default() -> Self {
        Self {
            b: 100,
            scale: false,
            alpha: 0.05,
            fold: 10,
            probs: vec![0.25, 0.5, 0.75],
            weights: vec![0.25, 0.5, 0.25],
            k: 10,
            parallel: false,
            replicable: true,
            seed: 0,
        }
    }
}

impl OrdensityParams {
    /// Validate the parameter set; called once at pipeline entry
    pub fn validate(&self) -> Result<()> {
        if self.probs.is_empty() {
            return Err(OrdensityError::InvalidParams {
                reason: "probs must not be empty".to_string(),
            });
        }
        if self.probs.len() != self.weights.len() {
            return Err(OrdensityError::InvalidParams {
                reason: format!(
                    "probs has {} entries but weights has {}",
                    self.probs.len(),
                    self.weights.len()
                ),
            });
        }
        if self.probs.iter().any(|&p| p <= 0.0 || p >= 1.0) {
            return Err(OrdensityError::InvalidParams {
                reason: "probs must lie strictly between 0 and 1".to_string(),
            });
        }
        if self.probs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(OrdensityError::InvalidParams {
                reason: "probs must be strictly increasing".to_string(),
            });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(OrdensityError::InvalidParams {
                reason: format!("alpha must lie in (0, 1), got {}", self.alpha),
            });
        }
        if self.b == 0 {
            return Err(OrdensityError::InvalidParams {
                reason: "b (replicate count) must be at least 1".to_string(),
            });
        }
        if self.fold == 0 {
            return Err(OrdensityError::InvalidParams {
                reason: "fold must be at least 1".to_string(),
            });
        }
        if self.k == 0 {
            return Err(OrdensityError::InvalidParams {
                reason: "k (neighbour count) must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(OrdensityParams::default().validate().is_ok());
    }

    #[test]
    fn test_mismatched_weights_rejected() {
        let params = OrdensityParams {
            weights: vec![0.5, 0.5],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_non_increasing_probs_rejected() {
        let params = OrdensityParams {
            probs: vec![0.25, 0.25, 0.75],
            weights: vec![0.25, 0.5, 0.25],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_probs_outside_unit_interval_rejected() {
        let params = OrdensityParams {
            probs: vec![0.0, 0.5, 0.75],
            weights: vec![0.25, 0.5, 0.25],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_alpha_bounds() {
        for alpha in [0.0, 1.0, -0.1, 1.5] {
            let params = OrdensityParams {
                alpha,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "alpha {} should be rejected", alpha);
        }
    }

    #[test]
    fn test_zero_counts_rejected() {
        for (b, fold, k) in [(0, 10, 10), (100, 0, 10), (100, 10, 0)] {
            let params = OrdensityParams {
                b,
                fold,
                k,
                ..Default::default()
            };
            assert!(params.validate().is_err());
        }
    }
}
