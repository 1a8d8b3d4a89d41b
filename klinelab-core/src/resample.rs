//! Fixed-count bar aggregation.
//!
//! Buckets are consecutive runs of `step` bars: 5 for a "week", 20 for a
//! "month". They are NOT aligned to calendar weeks or months; a holiday or a
//! gap in the input shifts every later bucket boundary. A trailing partial
//! bucket is kept.
//!
//! Aggregated bars are always re-annotated from scratch; derived values on
//! the fine-grained input are never carried over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::domain::Bar;
use crate::engine::annotate;

/// Coarser period to resample into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplePeriod {
    /// 5 bars per bucket.
    Week,
    /// 20 bars per bucket.
    Month,
}

impl ResamplePeriod {
    /// Number of input bars per output bar.
    pub fn step(self) -> usize {
        match self {
            ResamplePeriod::Week => 5,
            ResamplePeriod::Month => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResamplePeriod::Week => "week",
            ResamplePeriod::Month => "month",
        }
    }
}

impl fmt::Display for ResamplePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resample period '{0}' (expected week/W or month/M)")]
pub struct ParsePeriodError(pub String);

impl FromStr for ResamplePeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "w" => Ok(ResamplePeriod::Week),
            "month" | "m" => Ok(ResamplePeriod::Month),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// Aggregate `bars` into `period` buckets and annotate the result.
pub fn resample(bars: &[Bar], period: ResamplePeriod) -> Vec<Bar> {
    let aggregated = aggregate(bars, period.step());
    debug!(
        period = %period,
        input = bars.len(),
        output = aggregated.len(),
        "resampled series"
    );
    annotate(&aggregated)
}

/// Collapse consecutive runs of `step` bars into one bar each, without
/// computing indicators.
///
/// `date` and `close` come from the bucket's last bar, `open` from its first,
/// `high`/`low` are the extremes and `volume` is the sum.
///
/// # Panics
/// Panics if `step` is zero.
pub fn aggregate(bars: &[Bar], step: usize) -> Vec<Bar> {
    assert!(step >= 1, "resample step must be >= 1");

    let mut out = Vec::with_capacity(bars.len().div_ceil(step));
    for chunk in bars.chunks(step) {
        let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
            continue;
        };
        let high = chunk.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let low = chunk.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let volume = chunk.iter().map(|b| b.volume).sum();
        out.push(Bar::new(last.date, first.open, high, low, last.close, volume));
    }
    out
}
