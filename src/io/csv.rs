//! CSV reading for expression matrices

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::data::ExpressionMatrix;
use crate::error::{OrdensityError, Result};

/// Strip surrounding quotes from a string
fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')) {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Read an expression matrix from a CSV or TSV file (delimiter auto-detected).
/// Expected format: first column is gene IDs, first row is sample IDs.
pub fn read_expression_matrix<P: AsRef<Path>>(path: P) -> Result<ExpressionMatrix> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or_else(|| OrdensityError::EmptyData {
        reason: "Empty expression file".to_string(),
    })??;

    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };

    let header: Vec<&str> = header_line.split(delimiter).collect();
    if header.len() < 2 {
        return Err(OrdensityError::InvalidExpressionMatrix {
            reason: "Not enough columns in header".to_string(),
        });
    }
    let n_samples = header.len() - 1;

    let mut gene_ids: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != n_samples + 1 {
            return Err(OrdensityError::InvalidExpressionMatrix {
                reason: format!(
                    "Row has {} columns, expected {}",
                    fields.len(),
                    n_samples + 1
                ),
            });
        }

        gene_ids.push(strip_quotes(fields[0]));

        let row: Result<Vec<f64>> = fields[1..]
            .iter()
            .map(|s| {
                let val = strip_quotes(s);
                val.parse::<f64>()
                    .map_err(|_| OrdensityError::InvalidExpressionMatrix {
                        reason: format!("Invalid expression value: {}", val),
                    })
            })
            .collect();
        rows.push(row?);
    }

    if gene_ids.is_empty() {
        return Err(OrdensityError::EmptyData {
            reason: "No genes found in expression file".to_string(),
        });
    }

    let n_genes = gene_ids.len();
    let mut values = Array2::zeros((n_genes, n_samples));
    for (i, row) in rows.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            values[[i, j]] = val;
        }
    }

    ExpressionMatrix::new(values, gene_ids)
}
