//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = close[t] * k + EMA[t-1] * (1 - k), k = 2 / (period + 1).
//! Seed: EMA[0] = close[0]. This is not the SMA-seeded textbook EMA; the early
//! values lean on the first close, and every index has a value.
//! Lookback: 0.

use crate::components::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.period).into_iter().map(Some).collect()
    }
}

/// Compute raw EMA values from a pre-extracted f64 slice.
/// Used by MACD, which needs the EMA of the DIF line as well as of closes.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    result.push(first);
    let mut prev = first;
    for &v in &values[1..] {
        let ema = v * k + prev * (1.0 - k);
        result.push(ema);
        prev = ema;
    }

    result
}
