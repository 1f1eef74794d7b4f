use std::path::PathBuf;

use anyhow::{anyhow, Result};
use config::{File, Source};
use directories::BaseDirs;
use log::warn;
use serde::{de::Error, Deserialize, Deserializer};
use serde_with::{serde_as, DeserializeAs, DisplayFromStr};

use crate::{output::OutputFormat, parser::Options, sentence::DEFAULT_DELIMITER};

const CONFIG_FILE: &str = "morphpack.toml";

/// Loads `morphpack.toml` from the user's config directory; a missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    load_config_at(config_path())
}

fn load_config_at(path: Option<PathBuf>) -> Result<Config> {
    let path = path.ok_or_else(|| {
        warn!("No home directory to look for {} in", CONFIG_FILE);
        anyhow!("no home directory to look for {} in", CONFIG_FILE)
    })?;
    load_config_from(File::from(path).required(false))
}

pub fn load_config_from<S>(source: S) -> Result<Config>
where
    S: Source + Send + Sync + 'static,
{
    config::Config::builder()
        .add_source(source)
        .build()
        .map_err(|e| {
            warn!("Failed to load config file: {:?}", e);
            e
        })?
        .try_deserialize()
        .map_err(|e| {
            warn!("Incompatible configuration: {:?}", e);
            anyhow!("Incompatible configuration: {:?}", e)
        })
}

fn config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[derive(Deserialize, PartialEq, Debug, Default)]
pub struct Config {
    #[serde(default = "Input::default")]
    pub input: Input,
    #[serde(default = "Output::default")]
    pub output: Output,
    #[serde(default = "Batch::default")]
    pub batch: Batch,
}

impl Config {
    pub fn options(&self) -> Options {
        Options {
            format: self.output.format,
            delimiter: self.input.delimiter,
        }
    }
}

// input

fn default_extension() -> String {
    "txt".to_owned()
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

#[serde_as]
#[derive(Deserialize, PartialEq, Debug)]
pub struct Input {
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            delimiter: default_delimiter(),
        }
    }
}

// output

struct LocalFormat;

impl<'de> DeserializeAs<'de, OutputFormat> for LocalFormat {
    fn deserialize_as<D>(deserializer: D) -> Result<OutputFormat, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<OutputFormat>()
            .map_err(|e| D::Error::custom(format!("{} on \"{}\"", e, s)))
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::default()
}

fn default_dir() -> PathBuf {
    PathBuf::from("out")
}

#[serde_as]
#[derive(Deserialize, PartialEq, Debug)]
pub struct Output {
    #[serde_as(as = "LocalFormat")]
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            format: default_format(),
            dir: default_dir(),
        }
    }
}

// batch

fn default_workers() -> usize {
    2
}

#[derive(Deserialize, PartialEq, Debug)]
pub struct Batch {
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for Batch {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}
