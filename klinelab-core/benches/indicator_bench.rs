//! Criterion benchmarks for KlineLab hot paths.
//!
//! Benchmarks:
//! 1. Single-indicator precompute (SMA, RSI, Bollinger)
//! 2. Full annotate pass (standard plan)
//! 3. Week/month resampling including re-annotation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use klinelab_core::components::indicator::Indicator;
use klinelab_core::domain::{Bar, IndicatorField};
use klinelab_core::engine::{annotate, precompute_indicators};
use klinelab_core::indicators::{Bollinger, Rsi, Sma};
use klinelab_core::resample::{resample, ResamplePeriod};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            let high = close + 1.5;
            let low = close - 1.5;
            Bar::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                1_000_000 + (i as u64 % 500_000),
            )
        })
        .collect()
}

// ── 1. Single indicators ─────────────────────────────────────────────

fn bench_single_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_precompute");

    for &bar_count in &[200, 1260, 2520] {
        let bars = make_bars(bar_count);

        let cases: Vec<(IndicatorField, Box<dyn Indicator>)> = vec![
            (IndicatorField::Ma60, Box::new(Sma::new(60)) as Box<dyn Indicator>),
            (IndicatorField::Rsi, Box::new(Rsi::new(14)) as Box<dyn Indicator>),
            (IndicatorField::BbUpper, Box::new(Bollinger::upper(20, 2.0)) as Box<dyn Indicator>),
        ];
        for case in cases {
            let name = case.1.name().to_string();
            let plan = vec![case];
            group.bench_with_input(BenchmarkId::new(name, bar_count), &bar_count, |b, _| {
                b.iter(|| precompute_indicators(black_box(&bars), black_box(&plan)));
            });
        }
    }

    group.finish();
}

// ── 2. Full annotate ─────────────────────────────────────────────────

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");

    for &bar_count in &[200, 1260, 2520] {
        let bars = make_bars(bar_count);
        group.bench_with_input(
            BenchmarkId::new("standard_plan", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| annotate(black_box(&bars)));
            },
        );
    }

    group.finish();
}

// ── 3. Resampling ────────────────────────────────────────────────────

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let bars = make_bars(2520);

    for period in [ResamplePeriod::Week, ResamplePeriod::Month] {
        group.bench_function(period.as_str(), |b| {
            b.iter(|| resample(black_box(&bars), period));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_indicators, bench_annotate, bench_resample);
criterion_main!(benches);
