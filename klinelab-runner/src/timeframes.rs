//! Multi-timeframe analysis.
//!
//! Day, week and month all derive from one daily series (week and month by
//! fixed-count resampling). The 30m and 5m series come from the data source
//! separately and are only annotated. Every timeframe is independent, so they
//! are computed in parallel with Rayon.

use klinelab_core::domain::Bar;
use klinelab_core::{annotate, resample, ResamplePeriod};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Chart granularity. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "30m")]
    Min30,
    #[serde(rename = "5m")]
    Min5,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Day,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Min30,
        Timeframe::Min5,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Min30 => "30m",
            Timeframe::Min5 => "5m",
        }
    }

    /// The resample period when this timeframe is derived from daily bars.
    pub fn resample_period(self) -> Option<ResamplePeriod> {
        match self {
            Timeframe::Week => Some(ResamplePeriod::Week),
            Timeframe::Month => Some(ResamplePeriod::Month),
            _ => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timeframe '{0}' (expected day, week, month, 30m or 5m)")]
pub struct ParseTimeframeError(pub String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(Timeframe::Day),
            "week" | "w" => Ok(Timeframe::Week),
            "month" | "m" => Ok(Timeframe::Month),
            "30m" => Ok(Timeframe::Min30),
            "5m" => Ok(Timeframe::Min5),
            _ => Err(ParseTimeframeError(s.to_string())),
        }
    }
}

/// Raw series supplied by the data source.
#[derive(Debug, Clone, Default)]
pub struct TimeframeInput {
    pub daily: Vec<Bar>,
    pub min30: Option<Vec<Bar>>,
    pub min5: Option<Vec<Bar>>,
}

/// Annotated series per timeframe. Timeframes without input are absent.
pub type TimeframeSet = BTreeMap<Timeframe, Vec<Bar>>;

/// Computes the requested timeframes from a `TimeframeInput`.
#[derive(Debug, Clone)]
pub struct Analyzer {
    parallel: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn analyze(&self, input: &TimeframeInput, wanted: &[Timeframe]) -> TimeframeSet {
        let set: TimeframeSet = if self.parallel {
            wanted
                .par_iter()
                .filter_map(|&tf| compute_timeframe(input, tf).map(|bars| (tf, bars)))
                .collect()
        } else {
            wanted
                .iter()
                .filter_map(|&tf| compute_timeframe(input, tf).map(|bars| (tf, bars)))
                .collect()
        };

        info!(
            requested = wanted.len(),
            computed = set.len(),
            daily_bars = input.daily.len(),
            "analyzed timeframes"
        );
        set
    }
}

/// Analyze every timeframe in parallel.
pub fn analyze(input: &TimeframeInput) -> TimeframeSet {
    Analyzer::new().analyze(input, &Timeframe::ALL)
}

fn compute_timeframe(input: &TimeframeInput, tf: Timeframe) -> Option<Vec<Bar>> {
    match tf {
        Timeframe::Day => Some(annotate(&input.daily)),
        Timeframe::Week | Timeframe::Month => {
            let period = tf.resample_period()?;
            Some(resample(&input.daily, period))
        }
        Timeframe::Min30 => input.min30.as_deref().map(annotate),
        Timeframe::Min5 => input.min5.as_deref().map(annotate),
    }
}
