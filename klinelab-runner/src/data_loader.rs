//! Bar loading and validation for the runner.
//!
//! Reads OHLCV rows from CSV (header `date,open,high,low,close,volume`, extra
//! columns ignored) and checks them before they reach the indicator engine,
//! which does no validation of its own:
//! 1. Every bar has positive prices with `low <= open, close <= high`
//! 2. Dates never go backwards
//!
//! An input with a header and no rows loads as an empty series.

use klinelab_core::domain::{timestamp, Bar};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid date '{value}': {source}")]
    Date {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("row {row} ({date}): prices are non-positive or outside the high/low range")]
    InvalidBar { row: usize, date: String },

    #[error("row {row} ({date}): date is earlier than the previous bar ({previous})")]
    NonMonotonic {
        row: usize,
        date: String,
        previous: String,
    },
}

/// One CSV row as supplied by the data source, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl RawBar {
    fn into_bar(self, row: usize) -> Result<Bar, LoadError> {
        let date = timestamp::parse(&self.date).map_err(|source| LoadError::Date {
            row,
            value: self.date.clone(),
            source,
        })?;
        Ok(Bar::new(
            date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ))
    }
}

/// Load and validate bars from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bars = read_csv(file)?;
    info!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}

/// Parse and validate bars from any CSV reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Bar>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for (i, record) in rdr.deserialize::<RawBar>().enumerate() {
        bars.push(record?.into_bar(i + 1)?);
    }

    if bars.is_empty() {
        warn!("input contains no bars");
    }
    validate_bars(&bars)?;
    Ok(bars)
}

/// Check OHLC sanity and date order. Row numbers in errors are 1-based.
pub fn validate_bars(bars: &[Bar]) -> Result<(), LoadError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(LoadError::InvalidBar {
                row: i + 1,
                date: timestamp::format(&bar.date),
            });
        }
        if i > 0 && bar.date < bars[i - 1].date {
            return Err(LoadError::NonMonotonic {
                row: i + 1,
                date: timestamp::format(&bar.date),
                previous: timestamp::format(&bars[i - 1].date),
            });
        }
    }
    Ok(())
}

/// Compute a deterministic BLAKE3 hash over all bar data.
///
/// Covers dates and raw OHLCV only; derived indicator fields are ignored, so
/// a raw series and its annotated copy hash the same.
pub fn dataset_hash(bars: &[Bar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(timestamp::format(&bar.date).as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
