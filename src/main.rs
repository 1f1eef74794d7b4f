use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use morphpack::{
    batch::{collect_inputs, run_batch},
    config::load_config,
    morph::LinderaAnalyzer,
    output::{absolute, OutputFormat},
};

/// Analyzes every text file of a directory on a pool of workers.
#[derive(Parser)]
#[command(name = "morphpack", version)]
struct Opts {
    /// Directory holding the input text files.
    #[arg(short, long)]
    in_path: PathBuf,
    /// Directory receiving one artifact per input.
    #[arg(short, long)]
    out_path: Option<PathBuf>,
    /// Directory receiving the whitespace-segmented text.
    #[arg(short, long)]
    wakachi_path: Option<PathBuf>,
    /// Number of worker threads.
    #[arg(short, long)]
    proc_num: Option<usize>,
    /// Artifact format: bincode or json.
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let config = load_config().unwrap_or_default();
    debug!("{:?}", config);

    let mut options = config.options();
    if let Some(format) = opts.format {
        options.format = format;
    }
    let out_dir = absolute(opts.out_path.as_ref().unwrap_or(&config.output.dir))?;
    let wkc_dir = opts.wakachi_path.as_deref().map(absolute).transpose()?;
    let workers = opts.proc_num.unwrap_or(config.batch.workers);

    let inputs = collect_inputs(&opts.in_path, &config.input.extension)?;
    let done = run_batch(
        &inputs,
        &out_dir,
        wkc_dir.as_deref(),
        workers,
        options,
        LinderaAnalyzer::new,
    )?;

    info!(
        "{} files, {} sentences written to {}",
        done.len(),
        done.iter().map(|(_, summary)| summary.sentences).sum::<usize>(),
        out_dir.display()
    );
    Ok(())
}
