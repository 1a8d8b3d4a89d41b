//! KlineLab Runner — data loading, multi-timeframe analysis, diagnostics, export.
//!
//! This crate builds on `klinelab-core` to provide:
//! - CSV loading with OHLC and date-order validation
//! - Day/week/month/30m/5m analysis, computed in parallel
//! - Latest-bar diagnostics (MA trend, RSI zone, MACD bias, band position)
//! - A/HK security code normalization
//! - TOML configuration and JSON/CSV report export

pub mod config;
pub mod data_loader;
pub mod diagnostics;
pub mod export;
pub mod instrument;
pub mod runner;
pub mod timeframes;

pub use config::{AnalysisConfig, ConfigError, OutputFormat};
pub use data_loader::{dataset_hash, load_csv, read_csv, validate_bars, LoadError};
pub use diagnostics::{latest_snapshot, BandPosition, MacdBias, RsiZone, Snapshot};
pub use export::{export_bars_csv, export_json, import_json, load_artifacts, save_artifacts};
pub use instrument::{normalize_code, Market, NormalizedCode};
pub use runner::{
    analyze_from_data, run_analysis, AnalysisReport, RunError, TimeframeReport, SCHEMA_VERSION,
};
pub use timeframes::{analyze, Analyzer, Timeframe, TimeframeInput, TimeframeSet};
