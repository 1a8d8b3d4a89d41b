//! Annotate a bar series with the standard indicator set.

use tracing::debug;

use crate::domain::Bar;

use super::precompute::{precompute_indicators, standard_plan};

/// Return a copy of `bars` with every indicator field computed.
///
/// Any derived values already present on the input are discarded, so the
/// result depends only on dates and OHLCV. Empty input gives empty output.
pub fn annotate(bars: &[Bar]) -> Vec<Bar> {
    if bars.is_empty() {
        return Vec::new();
    }

    let plan = standard_plan();
    let values = precompute_indicators(bars, &plan);

    let annotated: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut out = bar.raw();
            for field in values.fields() {
                out.indicators.set(field, values.get(field, i));
            }
            out
        })
        .collect();

    debug!(
        bars = annotated.len(),
        indicators = values.len(),
        "annotated series"
    );
    annotated
}

/// Alias of [`annotate`].
pub fn calculate_indicators(bars: &[Bar]) -> Vec<Bar> {
    annotate(bars)
}
