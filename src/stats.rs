//! Order-statistics helpers shared across modules
//!
//! Contains the quantile and median functions used by the quantile-difference
//! encoder and the robust outlyingness index.

/// Empirical quantile with linear interpolation.
/// R equivalent: quantile(x, prob, type = 7), R's default.
///
/// Algorithm (Hyndman & Fan type 7):
/// 1. Sort the sample ascending
/// 2. h = (n - 1) * prob
/// 3. quantile = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
///
/// Returns NaN for an empty sample. `prob` is clamped to [0, 1].
pub fn quantile(x: &[f64], prob: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    if x.len() == 1 {
        return x[0];
    }

    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let prob = prob.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * prob;
    let lo = h.floor() as usize;
    let frac = h - h.floor();

    if lo + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

/// Quantiles at several probability levels from one shared sort.
///
/// Equivalent to calling [`quantile`] per level but sorts the sample once;
/// the encoder calls this per gene row.
pub fn quantiles(x: &[f64], probs: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return vec![f64::NAN; probs.len()];
    }

    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    probs
        .iter()
        .map(|&prob| {
            if n == 1 {
                return sorted[0];
            }
            let h = (n - 1) as f64 * prob.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let frac = h - h.floor();
            if lo + 1 >= n {
                sorted[n - 1]
            } else {
                sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
            }
        })
        .collect()
}

/// Sample median.
/// R equivalent: median(x), the mean of the two middle order statistics for
/// even sample sizes; identical to quantile(x, 0.5, type = 7).
pub fn median(x: &[f64]) -> f64 {
    quantile(x, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_matches_r_type7() {
        // R: quantile(c(1, 2, 3, 4, 5), c(0.25, 0.5, 0.75)) -> 2.0 3.0 4.0
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((quantile(&x, 0.25) - 2.0).abs() < 1e-12);
        assert!((quantile(&x, 0.5) - 3.0).abs() < 1e-12);
        assert!((quantile(&x, 0.75) - 4.0).abs() < 1e-12);

        // R: quantile(c(1, 2, 3, 4), 0.25) -> 1.75
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&y, 0.25) - 1.75).abs() < 1e-12);

        // Unsorted input gives the same answer
        let z = vec![4.0, 1.0, 3.0, 2.0];
        assert!((quantile(&z, 0.25) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_extremes() {
        let x = vec![3.0, 1.0, 2.0];
        assert_eq!(quantile(&x, 0.0), 1.0);
        assert_eq!(quantile(&x, 1.0), 3.0);
        assert_eq!(quantile(&x, -0.5), 1.0);
        assert_eq!(quantile(&x, 1.5), 3.0);
    }

    #[test]
    fn test_quantile_degenerate_samples() {
        assert!(quantile(&[], 0.5).is_nan());
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_quantiles_matches_single_calls() {
        let x = vec![0.3, 1.2, -0.5, 2.8, 0.0, 1.1, 0.7];
        let probs = [0.1, 0.25, 0.5, 0.75, 0.9];
        let batch = quantiles(&x, &probs);
        for (i, &p) in probs.iter().enumerate() {
            assert!((batch[i] - quantile(&x, p)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_median_even_odd() {
        assert!((median(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert!((median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }
}
