//! Indicator precomputation.
//!
//! A plan pairs each bar field with the indicator that fills it. All
//! indicators in the plan are computed before any bar is written.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Bar, IndicatorField};
use crate::indicators::{Bollinger, Macd, Rsi, Sma};

use super::{
    BOLLINGER_MULTIPLIER, BOLLINGER_PERIOD, MACD_FAST, MACD_SIGNAL, MACD_SLOW, MA_PERIODS,
    RSI_PERIOD,
};

pub type IndicatorPlan = Vec<(IndicatorField, Box<dyn Indicator>)>;

fn entry(field: IndicatorField, indicator: impl Indicator + 'static) -> (IndicatorField, Box<dyn Indicator>) {
    (field, Box::new(indicator))
}

/// The plan that fills every `IndicatorSet` field.
pub fn standard_plan() -> IndicatorPlan {
    let [p5, p10, p20, p60] = MA_PERIODS;
    vec![
        entry(IndicatorField::Ma5, Sma::new(p5)),
        entry(IndicatorField::Ma10, Sma::new(p10)),
        entry(IndicatorField::Ma20, Sma::new(p20)),
        entry(IndicatorField::Ma60, Sma::new(p60)),
        entry(IndicatorField::Dif, Macd::dif(MACD_FAST, MACD_SLOW, MACD_SIGNAL)),
        entry(IndicatorField::Dea, Macd::dea(MACD_FAST, MACD_SLOW, MACD_SIGNAL)),
        entry(IndicatorField::Macd, Macd::histogram(MACD_FAST, MACD_SLOW, MACD_SIGNAL)),
        entry(IndicatorField::Rsi, Rsi::new(RSI_PERIOD)),
        entry(
            IndicatorField::BbMiddle,
            Bollinger::middle(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER),
        ),
        entry(
            IndicatorField::BbUpper,
            Bollinger::upper(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER),
        ),
        entry(
            IndicatorField::BbLower,
            Bollinger::lower(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER),
        ),
    ]
}

/// Compute every indicator in `plan` over `bars`.
pub fn precompute_indicators(bars: &[Bar], plan: &[(IndicatorField, Box<dyn Indicator>)]) -> IndicatorValues {
    let mut values = IndicatorValues::new();
    for (field, indicator) in plan {
        let series = indicator.compute(bars);
        debug_assert_eq!(
            series.len(),
            bars.len(),
            "indicator '{}' produced {} values for {} bars",
            indicator.name(),
            series.len(),
            bars.len(),
        );
        values.insert(*field, series);
    }
    values
}
