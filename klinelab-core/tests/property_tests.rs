//! Property tests for indicator engine invariants.
//!
//! Uses proptest to verify:
//! 1. Moving averages — unset below the period, equal to the naive trailing mean above it
//! 2. EMA seeding — the first value is the first input, exactly
//! 3. MACD identity — histogram == 2 * (DIF - DEA), exactly
//! 4. RSI — bounded to [0, 100]; a rising 14-bar window reads 100
//! 5. Bollinger ordering — lower <= middle <= upper
//! 6. Purity — annotating twice (or re-annotating) gives identical output

use chrono::NaiveDate;
use proptest::prelude::*;
use klinelab_core::domain::{Bar, IndicatorField};
use klinelab_core::engine::{annotate, MA_PERIODS};
use klinelab_core::indicators::ema_of_series;

// ── Helpers ──────────────────────────────────────────────────────────

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                base + chrono::Duration::days(i as i64),
                open,
                open.max(close) * 1.01,
                open.min(close) * 0.99,
                close,
                1_000 + i as u64,
            )
        })
        .collect()
}

fn ma_field(period: usize) -> IndicatorField {
    match period {
        5 => IndicatorField::Ma5,
        10 => IndicatorField::Ma10,
        20 => IndicatorField::Ma20,
        60 => IndicatorField::Ma60,
        _ => unreachable!("no bar field for MA {period}"),
    }
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), len)
}

// ── 1. Moving averages ───────────────────────────────────────────────

proptest! {
    /// A series shorter than the period never gets a value for that MA.
    #[test]
    fn ma_unset_below_period(closes in arb_closes(0..60)) {
        let out = annotate(&bars_from_closes(&closes));
        for period in MA_PERIODS {
            if closes.len() < period {
                let field = ma_field(period);
                prop_assert!(out.iter().all(|b| b.indicators.get(field).is_none()));
            }
        }
    }

    /// MA at i >= p-1 equals the plain mean of the trailing p closes.
    #[test]
    fn ma_matches_naive_mean(closes in arb_closes(30..200)) {
        let out = annotate(&bars_from_closes(&closes));
        for period in MA_PERIODS {
            let field = ma_field(period);
            for (i, bar) in out.iter().enumerate() {
                let value = bar.indicators.get(field);
                if i + 1 < period {
                    prop_assert!(value.is_none());
                } else {
                    let window = &closes[i + 1 - period..=i];
                    let naive = window.iter().sum::<f64>() / period as f64;
                    let got = value.unwrap();
                    prop_assert!((got - naive).abs() <= 1e-9 * naive.abs().max(1.0),
                        "ma{} at {}: {} vs {}", period, i, got, naive);
                }
            }
        }
    }
}

// ── 2. EMA seeding ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_seed_is_first_close(closes in arb_closes(1..50), period in 1usize..100) {
        let ema = ema_of_series(&closes, period);
        prop_assert_eq!(ema.len(), closes.len());
        prop_assert_eq!(ema[0], closes[0]);
    }
}

// ── 3. MACD identity ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn macd_histogram_identity(closes in arb_closes(1..200)) {
        let out = annotate(&bars_from_closes(&closes));
        for bar in &out {
            let dif = bar.indicators.dif.unwrap();
            let dea = bar.indicators.dea.unwrap();
            prop_assert_eq!(bar.indicators.macd.unwrap(), 2.0 * (dif - dea));
        }
    }
}

// ── 4. RSI ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(closes in arb_closes(15..200)) {
        let out = annotate(&bars_from_closes(&closes));
        for (i, bar) in out.iter().enumerate() {
            match bar.indicators.rsi {
                None => prop_assert!(i < 14),
                Some(rsi) => prop_assert!((0.0..=100.0).contains(&rsi), "rsi {} at {}", rsi, i),
            }
        }
    }

    /// Fourteen strictly rising changes at the end of any history → RSI 100.
    #[test]
    fn rising_window_reads_100(
        prefix in arb_closes(0..40),
        start in arb_price(),
        steps in prop::collection::vec(0.01..5.0_f64, 14),
    ) {
        let mut closes = prefix;
        let mut price = start;
        closes.push(price);
        for step in steps {
            price += step;
            closes.push(price);
        }
        let out = annotate(&bars_from_closes(&closes));
        prop_assert_eq!(out.last().unwrap().indicators.rsi, Some(100.0));
    }
}

// ── 5. Bollinger ordering ────────────────────────────────────────────

proptest! {
    #[test]
    fn bollinger_bands_are_ordered(closes in arb_closes(20..200)) {
        let out = annotate(&bars_from_closes(&closes));
        for bar in out.iter().skip(19) {
            let lower = bar.indicators.bb_lower.unwrap();
            let middle = bar.indicators.bb_middle.unwrap();
            let upper = bar.indicators.bb_upper.unwrap();
            prop_assert!(lower <= middle && middle <= upper);
        }
    }
}

// ── 6. Purity ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn annotate_is_idempotent(closes in arb_closes(0..120)) {
        let bars = bars_from_closes(&closes);
        let first = annotate(&bars);
        let second = annotate(&bars);
        prop_assert_eq!(&first, &second);
        // Re-annotating an annotated series changes nothing either.
        prop_assert_eq!(&annotate(&first), &first);
    }
}
