use ask_ralph_report::config::{ReportConfig, DEFAULT_HISTOGRAM_BINS, OUT_DIR_ENV};
use ask_ralph_report::observability::init_tracing;
use ask_ralph_report::pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "ask-ralph-report")]
#[command(about = "Smoke-test metrics, pass/fail verdicts, and chart data from a results CSV")]
#[command(version)]
struct Args {
    /// Results CSV (one row per prompt/response evaluation)
    csv_path: PathBuf,

    /// Directory for report artifacts (or set ASK_RALPH_OUT_DIR; default: ./artifacts)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Number of bins in the latency histogram
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    histogram_bins: usize,

    /// Also print the metrics document as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    if !args.csv_path.exists() {
        error!("Results file not found: {}", args.csv_path.display());
        return Err(anyhow::anyhow!(
            "Results file not found: {}",
            args.csv_path.display()
        ));
    }

    let out_dir = ReportConfig::resolve_out_dir(args.out_dir, std::env::var(OUT_DIR_ENV).ok());
    let config = ReportConfig::new(args.csv_path, out_dir, args.histogram_bins)?
        .with_print_json(args.json);

    let outcome = pipeline::run(&config)
        .with_context(|| format!("Failed to build report from {}", config.input_path.display()))?;

    if config.print_json {
        println!("{}", outcome.document.to_json()?);
    }

    println!("Wrote artifacts to {}:", config.out_dir.display());
    for path in &outcome.written {
        println!("  - {}", path.display());
    }

    Ok(())
}
