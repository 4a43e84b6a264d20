//! Report Writer
//!
//! Renders a computed run into the artifacts directory: the markdown report,
//! a JSON document with every number, and one CSV series per chart. The
//! output directory is always passed in by the caller.

pub mod chart_data;
pub mod markdown;

use crate::core::metrics::{GroupedBreakdowns, HistogramBin, MetricsSummary};
use crate::core::{NormalizationStats, Verdict};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

pub const REPORT_FILE: &str = "report.md";
pub const METRICS_FILE: &str = "metrics.json";

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub summary: MetricsSummary,
    pub verdicts: Vec<Verdict>,
    pub breakdowns: GroupedBreakdowns,
    pub latency_histogram: Vec<HistogramBin>,
    pub normalization: NormalizationStats,
}

impl ReportDocument {
    pub fn all_pass(&self) -> bool {
        crate::core::verdict::all_pass(&self.verdicts)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes report artifacts into a single directory
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write every artifact, creating the directory if needed. Returns the
    /// written paths in a stable order.
    pub fn write(&self, doc: &ReportDocument) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)?;

        let faithfulness = self.out_dir.join(chart_data::FAITHFULNESS_BY_SCENARIO_FILE);
        chart_data::write_group_rates(
            &faithfulness,
            "faithful_rate",
            &doc.breakdowns.faithful_by_scenario,
        )?;

        let disagreements = self.out_dir.join(chart_data::DISAGREEMENT_TYPES_FILE);
        chart_data::write_category_counts(&disagreements, &doc.breakdowns.disagreement_types)?;

        let latency = self.out_dir.join(chart_data::LATENCY_HIST_FILE);
        chart_data::write_histogram(&latency, &doc.latency_histogram)?;

        let budget = self.out_dir.join(chart_data::BUDGET_VIOLATIONS_FILE);
        chart_data::write_group_rates(
            &budget,
            "violation_rate",
            &doc.breakdowns.budget_violation_by_scenario,
        )?;

        let report = self.out_dir.join(REPORT_FILE);
        fs::write(&report, markdown::render(doc))?;

        let metrics = self.out_dir.join(METRICS_FILE);
        fs::write(&metrics, doc.to_json()?)?;

        let written = vec![faithfulness, disagreements, latency, budget, report, metrics];
        debug!(out_dir = %self.out_dir.display(), files = written.len(), "Wrote report artifacts");
        Ok(written)
    }
}
