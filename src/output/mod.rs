use std::{
    env,
    ffi::OsString,
    fmt,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::morph::TokenRecord;

/// Every sentence of one input file, in reading order.
pub type Sentences = Vec<Vec<TokenRecord>>;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Bincode,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bincode => "bin",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bincode" | "bin" => Ok(OutputFormat::Bincode),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format \"{}\" (expected bincode or json)", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Bincode => formatter.write_str("bincode"),
            OutputFormat::Json => formatter.write_str("json"),
        }
    }
}

fn stem(in_file: &Path) -> Result<OsString> {
    in_file
        .file_stem()
        .map(|s| s.to_os_string())
        .ok_or_else(|| anyhow!("{} has no file name", in_file.display()))
}

/// `<out_dir>/<stem>.<ext>`
pub fn artifact_path(in_file: &Path, out_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let mut name = stem(in_file)?;
    name.push(".");
    name.push(format.extension());
    Ok(out_dir.join(name))
}

/// `<wkc_dir>/<stem>_wkc.txt`
pub fn wakachi_path(in_file: &Path, wkc_dir: &Path) -> Result<PathBuf> {
    let mut name = stem(in_file)?;
    name.push("_wkc.txt");
    Ok(wkc_dir.join(name))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        debug!("creating {}", dir.display());
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(())
}

/// Resolves `path` against the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path).with_context(|| {
        format!("failed to create {}", path.display())
    })?))
}

pub fn write_artifact(path: &Path, sentences: &[Vec<TokenRecord>], format: OutputFormat) -> Result<()> {
    let mut writer = create(path)?;
    match format {
        OutputFormat::Bincode => {
            bincode::serde::encode_into_std_write(sentences, &mut writer, bincode::config::standard())
                .with_context(|| format!("failed to encode {}", path.display()))?;
        }
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, sentences)
            .with_context(|| format!("failed to encode {}", path.display()))?,
    }
    writer.flush()?;
    Ok(())
}

pub fn read_artifact(path: &Path, format: OutputFormat) -> Result<Sentences> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let sentences: Sentences = match format {
        OutputFormat::Bincode => {
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
                .with_context(|| format!("failed to decode {}", path.display()))?
        }
        OutputFormat::Json => serde_json::from_reader(reader)
            .with_context(|| format!("failed to decode {}", path.display()))?,
    };
    Ok(sentences)
}

/// One line per sentence, every token followed by a space.
pub fn write_wakachi(path: &Path, sentences: &[Vec<TokenRecord>]) -> Result<()> {
    let mut writer = create(path)?;
    for sentence in sentences {
        for token in sentence {
            write!(writer, "{} ", token.text)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> TokenRecord {
        TokenRecord {
            text: text.to_owned(),
            reading: text.to_owned(),
            lemma: text.to_owned(),
            pos: "NOUN".to_owned(),
            tag: "名詞-一般".to_owned(),
            inf: String::new(),
            dep: "ROOT".to_owned(),
            dep_i: 0,
            dep_text: text.to_owned(),
        }
    }

    #[test]
    fn paths_derive_from_the_input_stem() {
        let in_file = Path::new("/data/corpus/news.2020.txt");
        assert_eq!(
            artifact_path(in_file, Path::new("/out"), OutputFormat::Bincode).unwrap(),
            PathBuf::from("/out/news.2020.bin")
        );
        assert_eq!(
            artifact_path(in_file, Path::new("/out"), OutputFormat::Json).unwrap(),
            PathBuf::from("/out/news.2020.json")
        );
        assert_eq!(
            wakachi_path(in_file, Path::new("/wkc")).unwrap(),
            PathBuf::from("/wkc/news.2020_wkc.txt")
        );
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        assert!(artifact_path(Path::new("/"), Path::new("/out"), OutputFormat::Bincode).is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("BIN".parse::<OutputFormat>(), Ok(OutputFormat::Bincode));
        assert!("msgpack".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "bincode");
    }

    #[test]
    fn ensure_dir_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // already there
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn artifact_is_readable_in_both_formats() {
        let tmp = tempfile::tempdir().unwrap();
        let sentences = vec![vec![record("雨"), record("。")], vec![]];
        for format in [OutputFormat::Bincode, OutputFormat::Json] {
            let path = tmp.path().join(format!("a.{}", format.extension()));
            write_artifact(&path, &sentences, format).unwrap();
            assert_eq!(read_artifact(&path, format).unwrap(), sentences);
        }
    }

    #[test]
    fn wakachi_keeps_the_trailing_space() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a_wkc.txt");
        let sentences = vec![vec![record("雨"), record("が"), record("降る")], vec![record("。")]];
        write_wakachi(&path, &sentences).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "雨 が 降る \n。 \n");
    }

    #[test]
    fn absolute_keeps_absolute_paths() {
        assert_eq!(absolute(Path::new("/out")).unwrap(), PathBuf::from("/out"));
        assert!(absolute(Path::new("out")).unwrap().is_absolute());
    }
}
