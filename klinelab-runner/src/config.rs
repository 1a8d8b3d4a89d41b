//! Serializable analysis configuration, loaded from TOML.
//!
//! ```toml
//! symbol = "600519"
//! timeframes = ["day", "week", "30m"]
//!
//! [input]
//! daily = "data/600519_daily.csv"
//! min30 = "data/600519_30m.csv"
//!
//! [output]
//! format = "json"
//! dir = "out"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::timeframes::Timeframe;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for the `analyze` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Security code as the user typed it; normalized when the report is built.
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Timeframes to emit. Empty means all of them.
    #[serde(default)]
    pub timeframes: Vec<Timeframe>,
}

/// CSV sources. Week and month are derived from `daily`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub daily: Option<PathBuf>,
    pub min30: Option<PathBuf>,
    pub min5: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for written artifacts. Stdout when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ConfigError::Invalid(format!(
                "unknown output format '{other}' (expected json or csv)"
            ))),
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a TOML file. Relative input paths are kept as written.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Requested timeframes, deduplicated and in canonical order.
    pub fn wanted_timeframes(&self) -> Vec<Timeframe> {
        if self.timeframes.is_empty() {
            return Timeframe::ALL.to_vec();
        }
        let mut wanted = self.timeframes.clone();
        wanted.sort();
        wanted.dedup();
        wanted
    }

    /// Checks that the configuration can drive an analysis run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.daily.is_none() {
            return Err(ConfigError::Invalid(
                "input.daily is required (week and month are derived from it)".into(),
            ));
        }
        if let Some(symbol) = &self.symbol {
            if symbol.trim().is_empty() {
                return Err(ConfigError::Invalid("symbol must not be empty".into()));
            }
        }
        // Timeframes named explicitly must have a source; the default set
        // silently skips intraday series that were not supplied.
        if self.timeframes.contains(&Timeframe::Min30) && self.input.min30.is_none() {
            return Err(ConfigError::Invalid(
                "timeframe 30m requested but input.min30 is not set".into(),
            ));
        }
        if self.timeframes.contains(&Timeframe::Min5) && self.input.min5.is_none() {
            return Err(ConfigError::Invalid(
                "timeframe 5m requested but input.min5 is not set".into(),
            ));
        }
        Ok(())
    }
}
