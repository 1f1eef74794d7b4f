use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use log::debug;

pub const DEFAULT_DELIMITER: char = '。';

const BOM: char = '\u{feff}';

/// Splits one line into sentences, keeping the delimiter at the end of each.
/// Text after the last delimiter is a sentence of its own; empty fragments are dropped.
pub fn split_contexts(line: &str, delimiter: char) -> Vec<&str> {
    line.trim_end_matches(|c: char| c == '\n' || c == '\r')
        .split_inclusive(delimiter)
        .collect()
}

/// Reads every sentence of a UTF-8 file, in order. A leading BOM is ignored.
pub fn read_contexts(path: &Path, delimiter: char) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut contexts = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}:{}", path.display(), n + 1))?;
        let line = if n == 0 {
            line.strip_prefix(BOM).unwrap_or(line.as_str())
        } else {
            line.as_str()
        };
        contexts.extend(split_contexts(line, delimiter).into_iter().map(str::to_owned));
    }
    debug!("{}: {} sentences", path.display(), contexts.len());
    Ok(contexts)
}
