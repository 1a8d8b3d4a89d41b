//! Domain types for KlineLab

pub mod bar;
pub mod timestamp;

pub use bar::{Bar, IndicatorField, IndicatorSet};

/// An ordered bar series, index 0 = oldest.
pub type Series = Vec<Bar>;
