//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are precomputed once per series, then copied onto the bars.

use crate::domain::{Bar, IndicatorField};
use std::collections::BTreeMap;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce an output series of the same
/// length. The first `lookback()` values are `None` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ma20", "rsi14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}

/// Container for precomputed indicator values, keyed by the bar field they fill.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: BTreeMap<IndicatorField, Vec<Option<f64>>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the series for a field, replacing any previous one.
    pub fn insert(&mut self, field: IndicatorField, values: Vec<Option<f64>>) {
        self.series.insert(field, values);
    }

    /// Value of `field` at `bar_index`. `None` if unset, out of range, or not computed.
    pub fn get(&self, field: IndicatorField, bar_index: usize) -> Option<f64> {
        self.series
            .get(&field)
            .and_then(|v| v.get(bar_index).copied().flatten())
    }

    /// Get the full series for a field.
    pub fn get_series(&self, field: IndicatorField) -> Option<&[Option<f64>]> {
        self.series.get(&field).map(|v| v.as_slice())
    }

    /// Fields that have a computed series, in column order.
    pub fn fields(&self) -> impl Iterator<Item = IndicatorField> + '_ {
        self.series.keys().copied()
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert(
            IndicatorField::Ma20,
            vec![None; 19].into_iter().chain([Some(100.0), Some(101.0)]).collect(),
        );
        assert_eq!(iv.get(IndicatorField::Ma20, 0), None);
        assert_eq!(iv.get(IndicatorField::Ma20, 19), Some(100.0));
        assert_eq!(iv.get(IndicatorField::Ma20, 20), Some(101.0));
        assert_eq!(iv.get(IndicatorField::Ma20, 21), None); // out of bounds
    }

    #[test]
    fn indicator_values_missing_field() {
        let iv = IndicatorValues::new();
        assert_eq!(iv.get(IndicatorField::Rsi, 0), None);
        assert!(iv.get_series(IndicatorField::Rsi).is_none());
    }

    #[test]
    fn indicator_values_len_and_field_order() {
        let mut iv = IndicatorValues::new();
        assert!(iv.is_empty());
        iv.insert(IndicatorField::Rsi, vec![Some(1.0), Some(2.0)]);
        iv.insert(IndicatorField::Ma5, vec![Some(1.0), Some(2.0)]);
        assert_eq!(iv.len(), 2);
        let fields: Vec<_> = iv.fields().collect();
        assert_eq!(fields, vec![IndicatorField::Ma5, IndicatorField::Rsi]);
    }
}
