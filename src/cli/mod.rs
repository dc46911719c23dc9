//! Command-line interface for ordensity

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ordensity")]
#[command(version)]
#[command(about = "ORdensity differential expression analysis in Rust")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full ORdensity analysis
    #[command(
        about = "Run the full ORdensity analysis",
        long_about = "Run the full ORdensity analysis\n\n\
            Encodes per-gene quantile differences between the two conditions,\n\
            scores genes with the robust OR outlyingness index, builds a null\n\
            distribution from B random repartitions of the pooled samples, and\n\
            reports candidate genes ranked by their false-positive neighbourhood\n\
            density.",
        after_long_help = "\
Examples:
  # Basic two-condition run with defaults (B=100, alpha=0.05, K=10)
  ordensity run -p treated.csv -n control.csv -o results.tsv

  # Reproducible parallel run on 8 threads, JSON output
  ordensity run -p treated.csv -n control.csv -o results.json \\
    --format json --parallel --threads 8 --seed 42

  # Scaled encoding with a stricter cut-point
  ordensity run -p treated.csv -n control.csv -o results.tsv \\
    --scale --alpha 0.01"
    )]
    Run {
        /// Path to the positive-condition expression CSV file
        #[arg(short = 'p', long,
            long_help = "Path to the positive-condition (e.g. treated) expression file.\n\
                Format: first column = gene IDs, remaining columns = samples.\n\
                CSV (comma) and TSV (tab) delimiters are auto-detected.")]
        positive: String,

        /// Path to the negative-condition expression CSV file
        #[arg(short = 'n', long,
            long_help = "Path to the negative-condition (e.g. control) expression file.\n\
                Must list the same genes in the same row order as the positive file.")]
        negative: String,

        /// Output path for the candidate gene table
        #[arg(short, long)]
        output: String,

        /// Output format: tsv or json
        #[arg(long, default_value = "tsv")]
        format: String,

        /// Number of permutation replicates for the null distribution
        #[arg(short = 'B', long = "replicates", default_value_t = 100)]
        replicates: usize,

        /// Scale each gene's quantile differences by its max interquartile range
        #[arg(long)]
        scale: bool,

        /// Significance level for the null cut-point
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,

        /// Number of folds for false-positive density estimation
        #[arg(long, default_value_t = 10)]
        fold: usize,

        /// Quantile probability levels (strictly increasing, in (0,1))
        #[arg(long, num_args = 1.., value_delimiter = ',',
            default_value = "0.25,0.5,0.75")]
        probs: Vec<f64>,

        /// Weights for the quantile differences (same length as --probs)
        #[arg(long, num_args = 1.., value_delimiter = ',',
            default_value = "0.25,0.5,0.25")]
        weights: Vec<f64>,

        /// Number of nearest neighbours per candidate gene
        #[arg(short = 'K', long, default_value_t = 10)]
        neighbours: usize,

        /// Run replicates and folds on the rayon thread pool
        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel (0 = rayon default)
        #[arg(long, default_value_t = 0)]
        threads: usize,

        /// Random seed for replicable runs
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Draw a fresh seed from OS entropy instead of --seed
        #[arg(long)]
        no_replicable: bool,
    },
}
