//! KlineLab Core — bar types, technical indicators, and resampling.
//!
//! This crate is the computational heart of KlineLab:
//! - Domain types (bars with a fixed set of optional indicator fields)
//! - Indicators: SMA, first-value-seeded EMA, MACD, simple-average RSI, Bollinger Bands
//! - The indicator engine, which annotates a series as a pure transform
//! - Fixed-count resampling to week/month buckets, re-annotated afterwards
//! - Moving-average trend classification
//!
//! Nothing here does I/O or validates input; that belongs to the caller.

pub mod components;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod resample;

pub use components::MaTrend;
pub use domain::{Bar, IndicatorField, IndicatorSet, Series};
pub use engine::{annotate, calculate_indicators};
pub use resample::{resample, ResamplePeriod};
