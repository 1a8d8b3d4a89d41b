//! KlineLab CLI — indicator annotation, resampling, and multi-timeframe analysis.
//!
//! Commands:
//! - `annotate` — attach MA/MACD/RSI/Bollinger fields to a daily CSV series
//! - `resample` — aggregate a daily CSV series into week or month bars
//! - `analyze` — multi-timeframe report with latest-bar diagnostics
//! - `normalize` — print the exchange-qualified form of a security code
//!
//! Data goes to stdout; logs go to stderr (`RUST_LOG` overrides the `info` default).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use klinelab_core::{annotate, resample, ResamplePeriod};
use klinelab_runner::export::render_bars;
use klinelab_runner::{
    export_json, load_csv, normalize_code, run_analysis, save_artifacts, AnalysisConfig,
    AnalysisReport, OutputFormat,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "klinelab",
    about = "KlineLab CLI — technical indicators for K-line series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a CSV series with every indicator field.
    Annotate {
        /// CSV with header date,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,

        /// Output format: json or csv.
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },
    /// Resample a daily CSV series into week (5 bars) or month (20 bars) buckets.
    Resample {
        /// CSV with header date,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,

        /// Target period: week or month.
        #[arg(long)]
        period: ResamplePeriod,

        /// Output format: json or csv.
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },
    /// Run a multi-timeframe analysis from a TOML config and/or flags.
    Analyze {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Daily CSV series.
        #[arg(long)]
        input: Option<PathBuf>,

        /// 30-minute CSV series.
        #[arg(long)]
        min30: Option<PathBuf>,

        /// 5-minute CSV series.
        #[arg(long)]
        min5: Option<PathBuf>,

        /// Security code (e.g., 600519, 0700.HK).
        #[arg(long)]
        symbol: Option<String>,

        /// Output format: json or csv (csv requires an output directory).
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Directory for report.json (and per-timeframe CSVs). Stdout when unset.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Normalize a security code to its exchange-qualified form.
    Normalize {
        /// Code as typed (e.g., 600519, 00700, 0700.HK).
        code: String,
    },
}

/// Flag values for `analyze` that override the config file.
#[derive(Debug, Default)]
struct AnalyzeOverrides {
    input: Option<PathBuf>,
    min30: Option<PathBuf>,
    min5: Option<PathBuf>,
    symbol: Option<String>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Annotate { input, format } => run_annotate(&input, format),
        Commands::Resample {
            input,
            period,
            format,
        } => run_resample(&input, period, format),
        Commands::Analyze {
            config,
            input,
            min30,
            min5,
            symbol,
            format,
            output_dir,
        } => run_analyze_cmd(
            config,
            AnalyzeOverrides {
                input,
                min30,
                min5,
                symbol,
                format,
                output_dir,
            },
        ),
        Commands::Normalize { code } => {
            let normalized = normalize_code(&code);
            println!("{}\t{}", normalized.code, normalized.market);
            Ok(())
        }
    }
}

fn run_annotate(input: &Path, format: OutputFormat) -> Result<()> {
    let bars = load_csv(input)?;
    let annotated = annotate(&bars);
    print!("{}", with_trailing_newline(render_bars(&annotated, format)?));
    Ok(())
}

fn run_resample(input: &Path, period: ResamplePeriod, format: OutputFormat) -> Result<()> {
    let bars = load_csv(input)?;
    let resampled = resample(&bars, period);
    info!(period = %period, input_bars = bars.len(), output_bars = resampled.len(), "resampled");
    print!("{}", with_trailing_newline(render_bars(&resampled, format)?));
    Ok(())
}

fn run_analyze_cmd(config_path: Option<PathBuf>, overrides: AnalyzeOverrides) -> Result<()> {
    let (config, base_dir) = match &config_path {
        Some(path) => {
            let config = AnalysisConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            (config, path.parent().map(Path::to_path_buf))
        }
        None => (AnalysisConfig::default(), None),
    };
    let config = apply_overrides(config, overrides);

    if config.output.format == OutputFormat::Csv && config.output.dir.is_none() {
        bail!("csv output writes one file per timeframe; pass --output-dir");
    }

    let report = run_analysis(&config, base_dir.as_deref())?;

    match &config.output.dir {
        Some(dir) => {
            print_summary(&report);
            save_artifacts(&report, dir, config.output.format)?;
            println!("Artifacts saved to: {}", dir.display());
        }
        None => println!("{}", export_json(&report)?),
    }
    Ok(())
}

/// Merge command-line flags over file values. Flag paths are made absolute so
/// they are not re-resolved against the config file's directory.
fn apply_overrides(mut config: AnalysisConfig, overrides: AnalyzeOverrides) -> AnalysisConfig {
    let absolute = |p: PathBuf| {
        if p.is_relative() {
            std::env::current_dir().map(|cwd| cwd.join(&p)).unwrap_or(p)
        } else {
            p
        }
    };

    if let Some(p) = overrides.input {
        config.input.daily = Some(absolute(p));
    }
    if let Some(p) = overrides.min30 {
        config.input.min30 = Some(absolute(p));
    }
    if let Some(p) = overrides.min5 {
        config.input.min5 = Some(absolute(p));
    }
    if let Some(symbol) = overrides.symbol {
        config.symbol = Some(symbol);
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(dir) = overrides.output_dir {
        config.output.dir = Some(dir);
    }
    config
}

fn print_summary(report: &AnalysisReport) {
    println!("=== Analysis Summary ===");
    if let Some(symbol) = &report.symbol {
        println!("Symbol:       {} ({})", symbol.code, symbol.market);
    }
    println!("Dataset hash: {}", report.dataset_hash);
    for (tf, tf_report) in &report.timeframes {
        match &tf_report.snapshot {
            Some(s) => println!(
                "{:<6} {:>5} bars  last {}  close {:.2}  trend {}  rsi {}  macd {:?}  band {}",
                tf.label(),
                tf_report.bars.len(),
                s.date,
                s.close,
                s.ma_trend,
                s.rsi.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into()),
                s.macd_bias,
                s.band_position
                    .map(|b| format!("{b:?}"))
                    .unwrap_or_else(|| "-".into()),
            ),
            None => println!("{:<6} {:>5} bars", tf.label(), tf_report.bars.len()),
        }
    }
}

fn with_trailing_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
