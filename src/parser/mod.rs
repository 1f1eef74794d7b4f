use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};

use crate::{
    morph::Analyzer,
    output::{
        artifact_path, ensure_dir, wakachi_path, write_artifact, write_wakachi, OutputFormat,
        Sentences,
    },
    sentence::{read_contexts, DEFAULT_DELIMITER},
};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Options {
    pub format: OutputFormat,
    pub delimiter: char,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Summary {
    pub sentences: usize,
    pub tokens: usize,
}

/// Turns one text file into its artifact (and optional wakachi file).
#[derive(Debug)]
pub struct Parser {
    in_file: PathBuf,
    out_file: PathBuf,
    wkc_file: Option<PathBuf>,
    options: Options,
}

impl Parser {
    /// Derives the output paths and creates the output directories.
    pub fn new(
        in_file: impl Into<PathBuf>,
        out_dir: &Path,
        wkc_dir: Option<&Path>,
        options: Options,
    ) -> Result<Self> {
        let in_file = in_file.into();
        let out_file = artifact_path(&in_file, out_dir, options.format)?;
        ensure_dir(out_dir)?;

        let wkc_file = match wkc_dir {
            Some(dir) => {
                ensure_dir(dir)?;
                Some(wakachi_path(&in_file, dir)?)
            }
            None => None,
        };

        Ok(Self {
            in_file,
            out_file,
            wkc_file,
            options,
        })
    }

    pub fn in_file(&self) -> &Path {
        &self.in_file
    }

    pub fn out_file(&self) -> &Path {
        &self.out_file
    }

    pub fn wkc_file(&self) -> Option<&Path> {
        self.wkc_file.as_deref()
    }

    pub fn parse<A: Analyzer + ?Sized>(&self, analyzer: &mut A) -> Result<Sentences> {
        read_contexts(&self.in_file, self.options.delimiter)?
            .iter()
            .map(|context| analyzer.analyze(context))
            .collect()
    }

    pub fn run<A: Analyzer + ?Sized>(&self, analyzer: &mut A) -> Result<Summary> {
        let sentences = self.parse(analyzer)?;

        write_artifact(&self.out_file, &sentences, self.options.format)?;
        debug!("wrote {}", self.out_file.display());

        if let Some(wkc_file) = &self.wkc_file {
            write_wakachi(wkc_file, &sentences)?;
            debug!("wrote {}", wkc_file.display());
        }

        let summary = Summary {
            sentences: sentences.len(),
            tokens: sentences.iter().map(Vec::len).sum(),
        };
        info!(
            "{}: {} sentences, {} tokens",
            self.in_file.display(),
            summary.sentences,
            summary.tokens
        );
        Ok(summary)
    }
}
