//!
//! The scaling analyzer arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The scaling analyzer arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Input text file containing benchmark output with BENCH lines.
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory for the metrics table and comparison charts.
    #[arg(long, default_value = "bench_out")]
    pub outdir: PathBuf,

    /// Metrics output format: `csv` or `json`.
    #[arg(long = "benchmark-format", default_value_t = scaling_analyzer::OutputFormat::Csv)]
    pub benchmark_format: scaling_analyzer::OutputFormat,

    /// Baseline noise-reduction policy: `min`, `mean`, or `median`.
    #[arg(long, default_value_t = scaling_analyzer::Aggregation::Min)]
    pub aggregation: scaling_analyzer::Aggregation,

    /// Skip chart rendering.
    #[arg(long)]
    pub no_plots: bool,
}
