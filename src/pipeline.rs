//! Report pipeline: load → normalize → compute → judge → write.

use crate::config::ReportConfig;
use crate::core::metrics::{histogram, Aggregator, BreakdownBuilder};
use crate::core::{evaluate, NormalizationStats, Normalizer, TestRecord};
use crate::error::Result;
use crate::ingestion::CsvLoader;
use crate::report::{ReportDocument, ReportWriter};
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of a completed run
#[derive(Debug)]
pub struct RunOutcome {
    pub document: ReportDocument,
    pub written: Vec<PathBuf>,
}

/// Build the full report document for already-normalized records.
pub fn build_document(
    source: &str,
    records: &[TestRecord],
    normalization: NormalizationStats,
    config: &ReportConfig,
) -> ReportDocument {
    let summary = Aggregator::summarize(records);
    let breakdowns = BreakdownBuilder::build(records);
    let verdicts = evaluate(&summary, &config.thresholds);

    let latencies: Vec<f64> = records.iter().filter_map(|r| r.latency_ms).collect();
    let latency_histogram = histogram(&latencies, config.histogram_bins);

    ReportDocument {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        source: source.to_string(),
        summary,
        verdicts,
        breakdowns,
        latency_histogram,
        normalization,
    }
}

pub fn run(config: &ReportConfig) -> Result<RunOutcome> {
    let loader = CsvLoader::from_path(&config.input_path)?;
    info!(source = %loader.source_id(), "Loading test results");
    let table = loader.load()?;
    if table.is_empty() {
        warn!(source = %table.source_id, "No test rows; every metric will be undefined");
    }

    let (records, stats) = Normalizer::normalize(&table);
    debug!(rows = table.len(), "Normalized records");
    log_data_quality(&stats);

    let document = build_document(&table.source_id, &records, stats, config);
    info!(
        run_id = %document.run_id,
        n_tests = document.summary.n_tests,
        all_pass = document.all_pass(),
        "Computed metrics"
    );
    for verdict in &document.verdicts {
        debug!(metric = %verdict.metric, observed = ?verdict.observed, status = %verdict.status, "Verdict");
    }

    let written = ReportWriter::new(&config.out_dir).write(&document)?;
    info!(out_dir = %config.out_dir.display(), files = written.len(), "Report written");

    Ok(RunOutcome { document, written })
}

fn log_data_quality(stats: &NormalizationStats) {
    if stats.unrecognized_faithful > 0 {
        warn!(
            rows = stats.unrecognized_faithful,
            "Unrecognized faithful values counted as unfaithful"
        );
    }
    if stats.total_unparsable() == 0 {
        return;
    }
    for (column, count) in &stats.unparsable_numeric {
        warn!(column = %column, rows = count, "Non-numeric values treated as missing");
    }
}
