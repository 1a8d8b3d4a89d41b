//! Bar — the fundamental market data unit, plus its derived indicator fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::trend::MaTrend;

/// OHLCV bar for a single time slice (a trading day, or an intraday interval).
///
/// The derived indicator values live in `indicators` and start out unset.
/// They are only ever written by the indicator engine, which hands back a
/// fresh series rather than touching the caller's bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(with = "super::timestamp")]
    pub date: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

impl Bar {
    /// Build a raw bar with no derived values.
    pub fn new(date: NaiveDateTime, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            indicators: IndicatorSet::default(),
        }
    }

    /// Returns true if any OHLC field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// OHLC sanity: positive prices and `low <= min(open, close) <= max(open, close) <= high`.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low > 0.0
    }

    /// Copy of this bar with every derived field cleared.
    pub fn raw(&self) -> Self {
        Self {
            indicators: IndicatorSet::default(),
            ..self.clone()
        }
    }

    /// Moving-average alignment at this bar.
    pub fn ma_trend(&self) -> MaTrend {
        MaTrend::classify(&self.indicators)
    }
}

/// Names of the derived per-bar fields, in output column order.
///
/// `name()` is the field name presentation code reads (`ma5`, `bbMiddle`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorField {
    Ma5,
    Ma10,
    Ma20,
    Ma60,
    Dif,
    Dea,
    Macd,
    Rsi,
    BbMiddle,
    BbUpper,
    BbLower,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 11] = [
        IndicatorField::Ma5,
        IndicatorField::Ma10,
        IndicatorField::Ma20,
        IndicatorField::Ma60,
        IndicatorField::Dif,
        IndicatorField::Dea,
        IndicatorField::Macd,
        IndicatorField::Rsi,
        IndicatorField::BbMiddle,
        IndicatorField::BbUpper,
        IndicatorField::BbLower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IndicatorField::Ma5 => "ma5",
            IndicatorField::Ma10 => "ma10",
            IndicatorField::Ma20 => "ma20",
            IndicatorField::Ma60 => "ma60",
            IndicatorField::Dif => "dif",
            IndicatorField::Dea => "dea",
            IndicatorField::Macd => "macd",
            IndicatorField::Rsi => "rsi",
            IndicatorField::BbMiddle => "bbMiddle",
            IndicatorField::BbUpper => "bbUpper",
            IndicatorField::BbLower => "bbLower",
        }
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived indicator values for one bar. `None` means insufficient history.
///
/// The shape is fixed: every field is always present, serialized as `null`
/// when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub dif: Option<f64>,
    pub dea: Option<f64>,
    pub macd: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorSet {
    pub fn get(&self, field: IndicatorField) -> Option<f64> {
        match field {
            IndicatorField::Ma5 => self.ma5,
            IndicatorField::Ma10 => self.ma10,
            IndicatorField::Ma20 => self.ma20,
            IndicatorField::Ma60 => self.ma60,
            IndicatorField::Dif => self.dif,
            IndicatorField::Dea => self.dea,
            IndicatorField::Macd => self.macd,
            IndicatorField::Rsi => self.rsi,
            IndicatorField::BbMiddle => self.bb_middle,
            IndicatorField::BbUpper => self.bb_upper,
            IndicatorField::BbLower => self.bb_lower,
        }
    }

    pub fn set(&mut self, field: IndicatorField, value: Option<f64>) {
        let slot = match field {
            IndicatorField::Ma5 => &mut self.ma5,
            IndicatorField::Ma10 => &mut self.ma10,
            IndicatorField::Ma20 => &mut self.ma20,
            IndicatorField::Ma60 => &mut self.ma60,
            IndicatorField::Dif => &mut self.dif,
            IndicatorField::Dea => &mut self.dea,
            IndicatorField::Macd => &mut self.macd,
            IndicatorField::Rsi => &mut self.rsi,
            IndicatorField::BbMiddle => &mut self.bb_middle,
            IndicatorField::BbUpper => &mut self.bb_upper,
            IndicatorField::BbLower => &mut self.bb_lower,
        };
        *slot = value;
    }

    /// True when no field has been computed.
    pub fn is_empty(&self) -> bool {
        IndicatorField::ALL.iter().all(|&f| self.get(f).is_none())
    }
}
