//! Writers for the candidate gene summary table

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::summary::OrdensityResult;

/// Write the summary table as tab-separated text, one row per candidate gene
/// in table order.
pub fn write_summary<P: AsRef<Path>>(path: P, result: &OrdensityResult) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "gene_id\tOR\tDifExp\tminFP\tmeanFP\tmaxFP\tdFP\tradius"
    )?;
    for gene in &result.genes {
        writeln!(
            file,
            "{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            gene.gene_id,
            gene.or,
            gene.dif_exp,
            gene.fp_min,
            gene.fp_mean,
            gene.fp_max,
            gene.dfp,
            gene.radius,
        )?;
    }

    Ok(())
}

/// Write the full result (table plus p0/K/cut-point metadata) as JSON.
pub fn write_summary_json<P: AsRef<Path>>(path: P, result: &OrdensityResult) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, result)?;
    Ok(())
}
