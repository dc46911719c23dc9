//! ordensity command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use ordensity::cli::{Cli, Commands};
use ordensity::prelude::*;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Run {
            positive,
            negative,
            output,
            format,
            replicates,
            scale,
            alpha,
            fold,
            probs,
            weights,
            neighbours,
            parallel,
            threads,
            seed,
            no_replicable,
        } => run_analysis(
            &positive,
            &negative,
            &output,
            &format,
            replicates,
            scale,
            alpha,
            fold,
            probs,
            weights,
            neighbours,
            parallel,
            threads,
            seed,
            no_replicable,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_analysis(
    positive_path: &str,
    negative_path: &str,
    output_path: &str,
    format: &str,
    replicates: usize,
    scale: bool,
    alpha: f64,
    fold: usize,
    probs: Vec<f64>,
    weights: Vec<f64>,
    neighbours: usize,
    parallel: bool,
    threads: usize,
    seed: u64,
    no_replicable: bool,
) -> Result<()> {
    if format != "tsv" && format != "json" {
        return Err(OrdensityError::InvalidParams {
            reason: format!("Unknown output format '{}'. Use 'tsv' or 'json'.", format),
        });
    }

    if parallel && threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    info!("Loading positive condition from: {}", positive_path);
    let positive = read_expression_matrix(positive_path)?;
    info!(
        "  {} genes, {} samples",
        positive.n_genes(),
        positive.n_samples()
    );

    info!("Loading negative condition from: {}", negative_path);
    let negative = read_expression_matrix(negative_path)?;
    info!(
        "  {} genes, {} samples",
        negative.n_genes(),
        negative.n_samples()
    );

    let params = OrdensityParams {
        b: replicates,
        scale,
        alpha,
        fold,
        probs,
        weights,
        k: neighbours,
        parallel,
        replicable: !no_replicable,
        seed,
    };

    let result = run_ordensity(&positive, &negative, &params)?;

    info!("Writing results to: {}", output_path);
    match format {
        "json" => write_summary_json(output_path, &result)?,
        _ => write_summary(output_path, &result)?,
    }

    println!("\n{}", result.summary());

    Ok(())
}
