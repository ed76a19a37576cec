//! # Configuration
//!
//! Optional TOML settings for the command-line tool. Every field has a
//! default, so a missing file, section or key is fine.

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: StegConfig = load_config("steg.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegConfig {
    pub output: OutputConfig,
    pub decode: DecodeConfig,
    pub logging: LoggingConfig,
}

/// Default output locations when `--output` is not given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prepended to the cover image's file name in encode mode
    pub encoded_prefix: String,
    /// File the recovered payload is written to in decode mode
    pub decoded_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoded_prefix: "encoded_".to_string(),
            decoded_name: "out".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Refuse to write output when the end-of-data marker is missing
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", self.level))
    }
}

impl StegConfig {
    /// Loads `path` if given, defaults otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }

    /// Default output path for an encoded copy of `image`: same directory,
    /// prefixed file name.
    pub fn encoded_path(&self, image: &Path) -> PathBuf {
        let file_name = image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        image.with_file_name(format!("{}{}", self.output.encoded_prefix, file_name))
    }

    pub fn decoded_path(&self) -> PathBuf {
        PathBuf::from(&self.output.decoded_name)
    }
}
