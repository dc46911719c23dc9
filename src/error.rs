//! Error types for the ORdensity engine

use thiserror::Error;

/// Main error type for ORdensity operations
#[derive(Error, Debug)]
pub enum OrdensityError {
    #[error("Invalid expression matrix: {reason}")]
    InvalidExpressionMatrix { reason: String },

    #[error("Invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Degenerate scale for gene {gene_index}: both interquartile ranges are zero")]
    DegenerateScale { gene_index: usize },

    #[error("Degenerate distance matrix: {reason}")]
    DegenerateDistances { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for ORdensity operations
pub type Result<T> = std::result::Result<T, OrdensityError>;
