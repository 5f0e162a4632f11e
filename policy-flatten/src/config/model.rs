//! Configuration data structures for the flattening run.
//!
//! Groups:
//! - [`FlattenConfig`]: top-level container
//! - [`IoConfig`]: input document and output directory
//! - [`OutputConfig`]: parquet compression, summary file
//! - [`IdConfig`]: key generator options
//!
//! All structs are `serde`-friendly so they can be loaded from YAML.

use crate::errors::{FlattenError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    pub io: IoConfig,
    pub output: OutputConfig,
    pub ids: IdConfig,
}

impl FlattenConfig {
    /// Validate config sanity.
    pub fn validate(&self) -> Result<()> {
        if self.io.input_path.as_os_str().is_empty() {
            return Err(FlattenError::Config("`input_path` is empty".into()));
        }
        if self.io.output_dir.as_os_str().is_empty() {
            return Err(FlattenError::Config("`output_dir` is empty".into()));
        }
        if self.io.input_path == self.io.output_dir {
            return Err(FlattenError::Config(format!(
                "`output_dir` must differ from `input_path`: {}",
                self.io.input_path.display()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// XML document to flatten.
    pub input_path: PathBuf,
    /// Directory receiving one parquet file per table.
    pub output_dir: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("sample/data.xml"),
            output_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub compression: ParquetCompression,
    /// Write `summary.json` next to the tables.
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression: ParquetCompression::Snappy,
            write_summary: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Memoize key generation within the run.
    pub cache: bool,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self { cache: true }
    }
}

/// Parquet compression codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    Uncompressed,
}

impl FromStr for ParquetCompression {
    type Err = FlattenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "gzip" => Ok(Self::Gzip),
            "uncompressed" | "none" => Ok(Self::Uncompressed),
            other => Err(FlattenError::Config(format!(
                "unknown compression `{other}` (expected snappy|zstd|gzip|uncompressed)"
            ))),
        }
    }
}

impl fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
            Self::Uncompressed => "uncompressed",
        };
        f.write_str(s)
    }
}
