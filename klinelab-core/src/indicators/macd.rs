//! MACD — Moving Average Convergence/Divergence.
//!
//! Three lines (separate Indicator instances):
//! - DIF: EMA(close, fast) - EMA(close, slow)
//! - DEA: EMA(DIF, signal)
//! - MACD histogram: 2 * (DIF - DEA)
//!
//! All EMAs are first-value seeded (see `ema`), so every line is defined from
//! the first bar. Lookback: 0.

use crate::components::indicator::Indicator;
use crate::domain::Bar;

use super::ema::ema_of_series;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Dif,
    Dea,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn dif(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Dif)
    }

    pub fn dea(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Dea)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Histogram)
    }

    fn with_line(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        let prefix = match line {
            MacdLine::Dif => "macd_dif",
            MacdLine::Dea => "macd_dea",
            MacdLine::Histogram => "macd_hist",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("{prefix}_{fast}_{slow}_{signal}"),
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let lines = macd_of_series(&closes, self.fast, self.slow, self.signal);
        let chosen = match self.line {
            MacdLine::Dif => lines.dif,
            MacdLine::Dea => lines.dea,
            MacdLine::Histogram => lines.macd,
        };
        chosen.into_iter().map(Some).collect()
    }
}

/// All three MACD lines for one input series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub macd: Vec<f64>,
}

pub fn macd_of_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = ema_of_series(values, fast);
    let ema_slow = ema_of_series(values, slow);
    let dif: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let dea = ema_of_series(&dif, signal);
    let macd = dif.iter().zip(&dea).map(|(d, e)| 2.0 * (d - e)).collect();
    MacdSeries { dif, dea, macd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn macd_starts_at_zero() {
        // Both EMAs seed at close[0], so DIF[0] = 0, DEA[0] = 0, MACD[0] = 0.
        let lines = macd_of_series(&[50.0, 51.0, 52.0], 12, 26, 9);
        assert_eq!(lines.dif[0], 0.0);
        assert_eq!(lines.dea[0], 0.0);
        assert_eq!(lines.macd[0], 0.0);
    }

    #[test]
    fn macd_known_second_value() {
        // k12 = 2/13, k26 = 2/27, k9 = 0.2
        // EMA12[1] = 11*2/13 + 10*11/13 = 10 + 2/13
        // EMA26[1] = 11*2/27 + 10*25/27 = 10 + 2/27
        // DIF[1] = 2/13 - 2/27
        // DEA[1] = 0.2*DIF[1] + 0.8*0
        // MACD[1] = 2*(DIF[1] - DEA[1]) = 1.6*DIF[1]
        let lines = macd_of_series(&[10.0, 11.0], 12, 26, 9);
        let dif1 = 2.0 / 13.0 - 2.0 / 27.0;
        assert_approx(lines.dif[1], dif1, DEFAULT_EPSILON);
        assert_approx(lines.dea[1], 0.2 * dif1, DEFAULT_EPSILON);
        assert_approx(lines.macd[1], 1.6 * dif1, DEFAULT_EPSILON);
    }

    #[test]
    fn rising_prices_give_positive_dif() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let lines = macd_of_series(&closes, 12, 26, 9);
        assert!(lines.dif[1..].iter().all(|&d| d > 0.0));
    }

    #[test]
    fn histogram_identity_is_exact() {
        let bars = make_bars(&[10.0, 12.0, 9.0, 14.0, 13.5, 15.0, 11.0]);
        let dif = Macd::dif(12, 26, 9).compute(&bars);
        let dea = Macd::dea(12, 26, 9).compute(&bars);
        let hist = Macd::histogram(12, 26, 9).compute(&bars);
        for i in 0..bars.len() {
            assert_eq!(hist[i].unwrap(), 2.0 * (dif[i].unwrap() - dea[i].unwrap()));
        }
    }

    #[test]
    fn macd_of_empty_series() {
        let lines = macd_of_series(&[], 12, 26, 9);
        assert_eq!(lines, MacdSeries::default());
    }

    #[test]
    fn macd_names_are_distinct() {
        assert_eq!(Macd::dif(12, 26, 9).name(), "macd_dif_12_26_9");
        assert_ne!(Macd::dea(12, 26, 9).name(), Macd::histogram(12, 26, 9).name());
    }
}
