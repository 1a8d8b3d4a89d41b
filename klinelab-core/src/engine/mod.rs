//! Indicator engine — turns a raw bar series into an annotated one.
//!
//! The standard plan is fixed: MA 5/10/20/60, MACD (12, 26, 9), RSI 14 and
//! Bollinger (20, 2σ). Each indicator is computed once over the whole series,
//! then the values are written onto copies of the input bars.

pub mod annotate;
pub mod precompute;

pub use annotate::{annotate, calculate_indicators};
pub use precompute::{precompute_indicators, standard_plan, IndicatorPlan};

pub const MA_PERIODS: [usize; 4] = [5, 10, 20, 60];
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;
