//! Expression matrix representation for one experimental condition

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{OrdensityError, Result};

/// Gene expression values for one experimental condition.
/// Rows are genes, columns are samples. The two condition matrices of a run
/// correspond row-by-row: the integer gene index is the join key used across
/// every intermediate structure.
#[derive(Debug, Clone)]
pub struct ExpressionMatrix {
    /// Expression data (genes x samples)
    values: Array2<f64>,
    /// Gene identifiers, one per row
    gene_ids: Vec<String>,
}

impl ExpressionMatrix {
    /// Create a new expression matrix from raw data
    pub fn new(values: Array2<f64>, gene_ids: Vec<String>) -> Result<Self> {
        let (n_genes, n_samples) = values.dim();

        if n_genes == 0 || n_samples == 0 {
            return Err(OrdensityError::EmptyData {
                reason: format!(
                    "Expression matrix must have at least one gene and one sample, got {}x{}",
                    n_genes, n_samples
                ),
            });
        }

        if gene_ids.len() != n_genes {
            return Err(OrdensityError::DimensionMismatch {
                expected: format!("{} gene IDs", n_genes),
                got: format!("{} gene IDs", gene_ids.len()),
            });
        }

        if values.iter().any(|x| !x.is_finite()) {
            return Err(OrdensityError::InvalidExpressionMatrix {
                reason: "Expression values must be finite".to_string(),
            });
        }

        Ok(Self { values, gene_ids })
    }

    /// Create a matrix with generated gene identifiers ("gene_1", "gene_2", ...)
    pub fn from_values(values: Array2<f64>) -> Result<Self> {
        let gene_ids = (1..=values.nrows()).map(|i| format!("gene_{}", i)).collect();
        Self::new(values, gene_ids)
    }

    /// Get the number of genes
    pub fn n_genes(&self) -> usize {
        self.values.nrows()
    }

    /// Get the number of samples
    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    /// Get the expression values as a view
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Get expression values for a specific gene
    pub fn gene_values(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(gene_idx)
    }

    /// Get gene IDs
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }
}

/// Validate that two condition matrices describe the same genes row-by-row
pub(crate) fn check_paired(
    positive: &ExpressionMatrix,
    negative: &ExpressionMatrix,
) -> Result<()> {
    if positive.n_genes() != negative.n_genes() {
        return Err(OrdensityError::DimensionMismatch {
            expected: format!("{} genes in both conditions", positive.n_genes()),
            got: format!("{} genes in negative condition", negative.n_genes()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_expression_matrix_creation() {
        let values = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let matrix =
            ExpressionMatrix::new(values, vec!["g1".to_string(), "g2".to_string()]).unwrap();
        assert_eq!(matrix.n_genes(), 2);
        assert_eq!(matrix.n_samples(), 3);
    }

    #[test]
    fn test_non_finite_rejected() {
        let values = array![[1.0, f64::NAN], [3.0, 4.0]];
        let result = ExpressionMatrix::new(values, vec!["g1".to_string(), "g2".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_rejected() {
        let values = Array2::<f64>::zeros((0, 5));
        assert!(ExpressionMatrix::new(values, vec![]).is_err());
    }

    #[test]
    fn test_generated_gene_ids() {
        let matrix = ExpressionMatrix::from_values(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(matrix.gene_ids(), &["gene_1".to_string(), "gene_2".to_string()]);
    }

    #[test]
    fn test_check_paired_row_counts() {
        let a = ExpressionMatrix::from_values(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = ExpressionMatrix::from_values(array![[1.0, 2.0]]).unwrap();
        assert!(check_paired(&a, &a).is_ok());
        assert!(check_paired(&a, &b).is_err());
    }
}
