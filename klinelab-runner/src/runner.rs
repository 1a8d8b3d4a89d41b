//! Analysis runner — wires together loading, timeframe analysis, and diagnostics.
//!
//! Two entry points:
//! - `run_analysis()`: loads every configured CSV, then analyzes. Used by the CLI.
//! - `analyze_from_data()`: takes pre-loaded series, no I/O.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use klinelab_core::domain::Bar;

use crate::config::{AnalysisConfig, ConfigError};
use crate::data_loader::{dataset_hash, load_csv, LoadError};
use crate::diagnostics::{latest_snapshot, Snapshot};
use crate::instrument::{normalize_code, NormalizedCode};
use crate::timeframes::{Analyzer, Timeframe, TimeframeInput};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Multi-timeframe analysis of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: Option<NormalizedCode>,
    /// BLAKE3 hash of the daily input series.
    pub dataset_hash: String,
    pub timeframes: BTreeMap<Timeframe, TimeframeReport>,
}

/// One annotated series plus the readings of its latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeReport {
    pub snapshot: Option<Snapshot>,
    pub bars: Vec<Bar>,
}

impl AnalysisReport {
    pub fn timeframe(&self, tf: Timeframe) -> Option<&TimeframeReport> {
        self.timeframes.get(&tf)
    }
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Load the configured CSV files and analyze them.
///
/// Relative input paths resolve against `base_dir` when given (normally the
/// directory holding the config file).
pub fn run_analysis(
    config: &AnalysisConfig,
    base_dir: Option<&Path>,
) -> Result<AnalysisReport, RunError> {
    config.validate()?;

    let resolve = |p: &Path| match base_dir {
        Some(base) if p.is_relative() => base.join(p),
        _ => p.to_path_buf(),
    };
    let load = |p: &Option<std::path::PathBuf>| -> Result<Option<Vec<Bar>>, LoadError> {
        p.as_deref().map(|p| load_csv(&resolve(p))).transpose()
    };

    let input = TimeframeInput {
        daily: load(&config.input.daily)?.unwrap_or_default(),
        min30: load(&config.input.min30)?,
        min5: load(&config.input.min5)?,
    };

    Ok(analyze_from_data(
        config.symbol.as_deref(),
        &input,
        &config.wanted_timeframes(),
    ))
}

/// Analyze pre-loaded series — no I/O.
pub fn analyze_from_data(
    symbol: Option<&str>,
    input: &TimeframeInput,
    wanted: &[Timeframe],
) -> AnalysisReport {
    let symbol = symbol.map(normalize_code);
    let hash = dataset_hash(&input.daily);

    let timeframes: BTreeMap<_, _> = Analyzer::new()
        .analyze(input, wanted)
        .into_iter()
        .map(|(tf, bars)| {
            let snapshot = latest_snapshot(&bars);
            (tf, TimeframeReport { snapshot, bars })
        })
        .collect();

    info!(
        symbol = symbol.as_ref().map(|s| s.code.as_str()).unwrap_or("-"),
        timeframes = timeframes.len(),
        dataset_hash = %hash,
        "analysis complete"
    );

    AnalysisReport {
        schema_version: SCHEMA_VERSION,
        symbol,
        dataset_hash: hash,
        timeframes,
    }
}
