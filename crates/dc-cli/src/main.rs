//! distcheck CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use dc_core::{DiagnosticSink, NormalityTest};
use dc_stats::{run_report, CompareConfig};
use dc_viz::QqPlotSink;

mod dataset;
mod render;

#[derive(Parser)]
#[command(name = "distcheck")]
#[command(about = "distcheck - column-wise distribution comparison of two tabular datasets")]
#[command(version)]
struct Cli {
    /// First input dataset (CSV with a header row)
    #[arg(long)]
    data: PathBuf,

    /// Second input dataset (CSV with the same columns)
    #[arg(long)]
    other_data: PathBuf,

    /// Significance level for the two-sample comparison tests
    #[arg(short = 'a', long, default_value = "0.05")]
    significance_level: f64,

    /// Force one normality test for every column instead of the
    /// sample-size based default
    #[arg(short = 'n', long, value_enum)]
    normality_test: Option<NormalityArg>,

    /// Write a QQ plot for every classified sample
    #[arg(long)]
    qqplot: bool,

    /// Directory for QQ plots (created on demand)
    #[arg(long, default_value = "figures")]
    qq_dir: PathBuf,

    /// Output file for the structured report (pretty JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalityArg {
    /// Shapiro-Wilk
    Shapiro,
    /// D'Agostino's K-squared
    Dagostino,
    /// Anderson-Darling
    Anderson,
}

impl From<NormalityArg> for NormalityTest {
    fn from(arg: NormalityArg) -> Self {
        match arg {
            NormalityArg::Shapiro => NormalityTest::Shapiro,
            NormalityArg::Dagostino => NormalityTest::Dagostino,
            NormalityArg::Anderson => NormalityTest::Anderson,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    if !(cli.significance_level > 0.0 && cli.significance_level < 1.0) {
        anyhow::bail!("significance level must lie strictly between 0 and 1");
    }

    print!("{}", render::banner(cli.significance_level));

    let data = dataset::load_dataset(&cli.data)?;
    let other_data = dataset::load_dataset(&cli.other_data)?;
    dataset::check_headers_match(&data, &other_data)?;

    let config = CompareConfig {
        significance_level: cli.significance_level,
        normality_override: cli.normality_test.map(Into::into),
    };

    let mut qq_sink;
    let sink: Option<&mut dyn DiagnosticSink> = if cli.qqplot {
        qq_sink = QqPlotSink::new(&cli.qq_dir);
        Some(&mut qq_sink)
    } else {
        None
    };

    let report = run_report(&data, &other_data, &config, sink).context("comparison failed")?;

    print!("{}", render::render_report(&report));

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
