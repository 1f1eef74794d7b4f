use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;
use morphpack::{
    config::load_config,
    morph::LinderaAnalyzer,
    output::{absolute, OutputFormat},
    parser,
};

/// Analyzes a single text file.
#[derive(Parser)]
#[command(name = "morphpack-file", version)]
struct Opts {
    /// Input text file.
    #[arg(short, long)]
    in_path: PathBuf,
    /// Directory receiving the artifact.
    #[arg(short, long)]
    out_path: Option<PathBuf>,
    /// Directory receiving the whitespace-segmented text.
    #[arg(short, long)]
    wkc_path: Option<PathBuf>,
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
    let wkc_dir = opts.wkc_path.as_deref().map(absolute).transpose()?;

    let parser = parser::Parser::new(&opts.in_path, &out_dir, wkc_dir.as_deref(), options)?;
    parser.run(&mut LinderaAnalyzer::new()?)?;
    Ok(())
}
