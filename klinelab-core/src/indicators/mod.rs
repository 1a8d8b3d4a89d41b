//! Concrete indicator implementations.
//!
//! Every indicator implements the `Indicator` trait from `components::indicator`
//! and has a series-level helper over `&[f64]` that does the actual work.
//!
//! Multi-series indicators (MACD, Bollinger) are exposed as separate named
//! instances per line or band, keeping the single-series `Indicator` trait
//! unchanged.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_of_series, BandPoint, Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use macd::{macd_of_series, Macd, MacdLine, MacdSeries};
pub use rsi::{rsi_of_series, Rsi};
pub use sma::{sma_of_series, Sma};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                1000,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
