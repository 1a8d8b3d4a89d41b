//! Latest-bar diagnostics: the readings a dashboard shows for one timeframe.
//!
//! Thresholds are fixed: RSI above 70 is overbought and below 30 oversold
//! (both strict), a positive MACD histogram is strong, and the close is
//! compared against the Bollinger bands.

use klinelab_core::domain::{timestamp, Bar};
use klinelab_core::MaTrend;
use serde::{Deserialize, Serialize};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI assumed when the series is too short to have one.
pub const RSI_FALLBACK: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(rsi: f64) -> Self {
        if rsi > RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else if rsi < RSI_OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdBias {
    /// Histogram above zero.
    Strong,
    /// Histogram at or below zero, or unset.
    Weak,
}

impl MacdBias {
    pub fn classify(macd: Option<f64>) -> Self {
        match macd {
            Some(v) if v > 0.0 => MacdBias::Strong,
            _ => MacdBias::Weak,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    AboveUpper,
    BelowLower,
    Inside,
}

impl BandPosition {
    /// `None` while the bands are still warming up.
    pub fn classify(bar: &Bar) -> Option<Self> {
        let upper = bar.indicators.bb_upper?;
        let lower = bar.indicators.bb_lower?;
        Some(if bar.close > upper {
            BandPosition::AboveUpper
        } else if bar.close < lower {
            BandPosition::BelowLower
        } else {
            BandPosition::Inside
        })
    }
}

/// Readings for the most recent bar of an annotated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: String,
    pub close: f64,
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma_trend: MaTrend,
    pub macd: Option<f64>,
    pub macd_bias: MacdBias,
    pub rsi: Option<f64>,
    pub rsi_zone: RsiZone,
    pub band_position: Option<BandPosition>,
}

impl Snapshot {
    pub fn from_bar(bar: &Bar) -> Self {
        let ind = &bar.indicators;
        Self {
            date: timestamp::format(&bar.date),
            close: bar.close,
            ma5: ind.ma5,
            ma10: ind.ma10,
            ma20: ind.ma20,
            ma_trend: bar.ma_trend(),
            macd: ind.macd,
            macd_bias: MacdBias::classify(ind.macd),
            rsi: ind.rsi,
            rsi_zone: RsiZone::classify(ind.rsi.unwrap_or(RSI_FALLBACK)),
            band_position: BandPosition::classify(bar),
        }
    }
}

/// Snapshot of the last bar, or `None` for an empty series.
pub fn latest_snapshot(bars: &[Bar]) -> Option<Snapshot> {
    bars.last().map(Snapshot::from_bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use klinelab_core::domain::IndicatorSet;

    fn bar_with(close: f64, indicators: IndicatorSet) -> Bar {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut bar = Bar::new(date, close, close + 1.0, close - 1.0, close, 100);
        bar.indicators = indicators;
        bar
    }

    #[test]
    fn rsi_zone_boundaries_are_strict() {
        assert_eq!(RsiZone::classify(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.01), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(30.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(29.99), RsiZone::Oversold);
        assert_eq!(RsiZone::classify(100.0), RsiZone::Overbought);
    }

    #[test]
    fn macd_bias() {
        assert_eq!(MacdBias::classify(Some(0.01)), MacdBias::Strong);
        assert_eq!(MacdBias::classify(Some(0.0)), MacdBias::Weak);
        assert_eq!(MacdBias::classify(Some(-1.0)), MacdBias::Weak);
        assert_eq!(MacdBias::classify(None), MacdBias::Weak);
    }

    #[test]
    fn band_position() {
        let bands = IndicatorSet {
            bb_upper: Some(12.0),
            bb_middle: Some(10.0),
            bb_lower: Some(8.0),
            ..IndicatorSet::default()
        };
        assert_eq!(BandPosition::classify(&bar_with(12.5, bands)), Some(BandPosition::AboveUpper));
        assert_eq!(BandPosition::classify(&bar_with(7.5, bands)), Some(BandPosition::BelowLower));
        assert_eq!(BandPosition::classify(&bar_with(12.0, bands)), Some(BandPosition::Inside));
        assert_eq!(BandPosition::classify(&bar_with(10.0, IndicatorSet::default())), None);
    }

    #[test]
    fn snapshot_of_warming_series_is_neutral() {
        let snap = Snapshot::from_bar(&bar_with(10.0, IndicatorSet::default()));
        assert_eq!(snap.ma_trend, MaTrend::Tangled);
        assert_eq!(snap.rsi, None);
        assert_eq!(snap.rsi_zone, RsiZone::Neutral);
        assert_eq!(snap.macd_bias, MacdBias::Weak);
        assert_eq!(snap.band_position, None);
        assert_eq!(snap.date, "2024-05-06");
    }

    #[test]
    fn snapshot_reads_bullish_bar() {
        let ind = IndicatorSet {
            ma5: Some(20.0),
            ma10: Some(15.0),
            ma20: Some(10.0),
            macd: Some(0.4),
            rsi: Some(75.0),
            bb_upper: Some(21.0),
            bb_lower: Some(9.0),
            ..IndicatorSet::default()
        };
        let snap = Snapshot::from_bar(&bar_with(22.0, ind));
        assert_eq!(snap.ma_trend, MaTrend::Long);
        assert_eq!(snap.macd_bias, MacdBias::Strong);
        assert_eq!(snap.rsi_zone, RsiZone::Overbought);
        assert_eq!(snap.band_position, Some(BandPosition::AboveUpper));
    }

    #[test]
    fn latest_snapshot_of_empty_is_none() {
        assert!(latest_snapshot(&[]).is_none());
    }
}
