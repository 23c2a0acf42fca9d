use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::configs::DriverParams;
use crate::formatter::DatasetFormatter;

/// Runs every job of the config, writing one arff file per (encoder, batch).
/// Stops at the first failure, files written before it are kept.
pub fn run(params: &DriverParams) -> Result<Vec<PathBuf>> {
    let batches = params.cifar.build();
    if !params.output_dir.exists() {
        fs::create_dir_all(&params.output_dir)
            .with_context(|| format!("Failed to create output dir {:?}", params.output_dir))?;
    }

    let mut written = Vec::new();
    for job in &params.jobs {
        let encoder = job.encoder.build();
        let formatter = DatasetFormatter::new(&batches, &encoder);
        println!("- Formatting {} features of batches {:?}", job.encoder.name(), job.batches);
        for &batch_id in &job.batches {
            let path = params.output_path(job.encoder, batch_id);
            formatter
                .format_arff_file(&path, batch_id, job.count)
                .with_context(|| format!("{} job on batch {}", job.encoder.name(), batch_id))?;
            written.push(path);
        }
    }
    Ok(written)
}
