//! Component traits and classifiers shared by the engine and its consumers.
//!
//! - `Indicator`: bar series in, aligned numeric series out
//! - `IndicatorValues`: precomputed series keyed by bar field
//! - `MaTrend`: moving-average alignment read off an annotated bar

pub mod indicator;
pub mod trend;

pub use indicator::{Indicator, IndicatorValues};
pub use trend::MaTrend;
