use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rayon::prelude::*;

use crate::{
    morph::Analyzer,
    parser::{Options, Parser, Summary},
};

/// Every regular, non-hidden file of `in_dir` with the given extension, sorted by path. Not recursive.
pub fn collect_inputs(in_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(in_dir).with_context(|| format!("failed to list {}", in_dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .map_or(true, |name| name.to_string_lossy().starts_with('.'));
        if !hidden && path.is_file() && path.extension().map_or(false, |e| e == extension) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=>-"),
    );
    Ok(progress)
}

/// Runs a [`Parser`] over every input on a pool of `workers` threads.
///
/// The inputs are split into `workers` chunks; each chunk builds one analyzer
/// with `new_analyzer` and reuses it for all of its files. Jobs are independent:
/// a failing file does not stop the others, and the error lists every file
/// that failed once all jobs ran.
pub fn run_batch<A, F>(
    inputs: &[PathBuf],
    out_dir: &Path,
    wkc_dir: Option<&Path>,
    workers: usize,
    options: Options,
    new_analyzer: F,
) -> Result<Vec<(PathBuf, Summary)>>
where
    A: Analyzer,
    F: Fn() -> Result<A> + Send + Sync,
{
    if workers == 0 {
        bail!("the number of workers must be at least 1");
    }
    if inputs.is_empty() {
        warn!("no input files");
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    let progress = progress_bar(inputs.len())?;
    info!("processing {} files with {} workers", inputs.len(), workers);

    let chunk_size = inputs.len().div_ceil(workers);
    let results: Vec<(PathBuf, Result<Summary>)> = pool.install(|| {
        inputs
            .par_chunks(chunk_size)
            .flat_map_iter(|chunk| {
                let mut analyzer = new_analyzer();
                chunk
                    .iter()
                    .map(|in_file| {
                        let result = match &mut analyzer {
                            Ok(analyzer) => {
                                Parser::new(in_file.as_path(), out_dir, wkc_dir, options)
                                    .and_then(|parser| parser.run(analyzer))
                            }
                            Err(e) => Err(anyhow!("failed to set up the analyzer: {:#}", e)),
                        };
                        progress.inc(1);
                        (in_file.clone(), result)
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    });
    progress.finish();

    let mut done = Vec::with_capacity(results.len());
    let mut failed = Vec::new();
    for (in_file, result) in results {
        match result {
            Ok(summary) => done.push((in_file, summary)),
            Err(e) => {
                error!("{}: {:#}", in_file.display(), e);
                failed.push(in_file.display().to_string());
            }
        }
    }

    if !failed.is_empty() {
        bail!(
            "{} of {} files failed: {}",
            failed.len(),
            inputs.len(),
            failed.join(", ")
        );
    }
    Ok(done)
}
