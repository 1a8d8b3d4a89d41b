//! Report export — JSON and CSV artifact generation.
//!
//! - **JSON**: full round-trip serialization of an `AnalysisReport` with schema versioning
//! - **CSV**: one row per bar with every indicator column, for spreadsheets and plotting
//!
//! Persisted JSON carries a `schema_version` field. Newer versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use klinelab_core::domain::{timestamp, Bar, IndicatorField};
use tracing::info;

use crate::config::OutputFormat;
use crate::runner::{AnalysisReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

/// Serialize an annotated series as a JSON array of bars.
pub fn export_bars_json(bars: &[Bar]) -> Result<String> {
    serde_json::to_string_pretty(bars).context("failed to serialize bars to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export an annotated series as CSV.
///
/// Columns: date, open, high, low, close, volume, then one column per
/// indicator field (ma5 … bbLower). Unset indicator values are empty cells.
pub fn export_bars_csv(bars: &[Bar]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date", "open", "high", "low", "close", "volume"];
    header.extend(IndicatorField::ALL.iter().map(|f| f.name()));
    wtr.write_record(&header)?;

    for bar in bars {
        let mut record = vec![
            timestamp::format(&bar.date),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        record.extend(
            IndicatorField::ALL
                .iter()
                .map(|&f| bar.indicators.get(f).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Render a series in the requested format.
pub fn render_bars(bars: &[Bar], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => export_bars_json(bars),
        OutputFormat::Csv => export_bars_csv(bars),
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for one report under `output_dir`.
///
/// Always writes `report.json`. With `OutputFormat::Csv`, also writes one
/// `<timeframe>.csv` per analyzed timeframe. Returns the written paths.
pub fn save_artifacts(
    report: &AnalysisReport,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let mut written = Vec::new();

    let report_path = output_dir.join("report.json");
    std::fs::write(&report_path, export_json(report)?)
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    written.push(report_path);

    if format == OutputFormat::Csv {
        for (tf, tf_report) in &report.timeframes {
            let path = output_dir.join(format!("{}.csv", tf.label()));
            std::fs::write(&path, export_bars_csv(&tf_report.bars)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path);
        }
    }

    info!(dir = %output_dir.display(), files = written.len(), "saved artifacts");
    Ok(written)
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let report_path = dir.join("report.json");
    let json = std::fs::read_to_string(&report_path)
        .with_context(|| format!("failed to read {}", report_path.display()))?;
    import_json(&json)
}
