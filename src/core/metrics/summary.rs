//! Metrics Summary
//!
//! Run-level scalar metrics. Rates divide by the full row count; the
//! relevance average and latency quantiles divide only by rows that carry a
//! valid value for that field.

use crate::core::metrics::quantile::quantile_sorted;
use crate::core::normalize::TestRecord;
use serde::{Deserialize, Serialize};

pub const CONTRADICTION: &str = "contradiction";
pub const UNSUPPORTED: &str = "unsupported";

/// Fixed-shape summary of one run. `None` means the metric is undefined
/// because its sample was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub n_tests: usize,
    pub faithful_rate: Option<f64>,
    pub contradiction_rate: Option<f64>,
    pub unsupported_rate: Option<f64>,
    pub avg_relevance: Option<f64>,
    pub toxicity_rate: Option<f64>,
    pub p50_latency_ms: Option<f64>,
    pub p95_latency_ms: Option<f64>,
    pub budget_violation_rate: Option<f64>,
}

impl MetricsSummary {
    /// Metric name to value, in report order.
    pub fn named_values(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("n_tests", Some(self.n_tests as f64)),
            ("faithful_rate", self.faithful_rate),
            ("contradiction_rate", self.contradiction_rate),
            ("unsupported_rate", self.unsupported_rate),
            ("avg_relevance", self.avg_relevance),
            ("toxicity_rate", self.toxicity_rate),
            ("p50_latency_ms", self.p50_latency_ms),
            ("p95_latency_ms", self.p95_latency_ms),
            ("budget_violation_rate", self.budget_violation_rate),
        ]
    }
}

/// Summary aggregator
pub struct Aggregator;

impl Aggregator {
    pub fn summarize(records: &[TestRecord]) -> MetricsSummary {
        let mut latencies: Vec<f64> = records.iter().filter_map(|r| r.latency_ms).collect();
        latencies.sort_by(f64::total_cmp);

        MetricsSummary {
            n_tests: records.len(),
            faithful_rate: Self::rate(records, |r| r.faithful),
            contradiction_rate: Self::rate(records, |r| r.has_disagreement(CONTRADICTION)),
            unsupported_rate: Self::rate(records, |r| r.has_disagreement(UNSUPPORTED)),
            avg_relevance: Self::mean(records.iter().filter_map(|r| r.relevance_score)),
            toxicity_rate: Self::rate(records, TestRecord::is_toxic),
            p50_latency_ms: quantile_sorted(&latencies, 0.50),
            p95_latency_ms: quantile_sorted(&latencies, 0.95),
            budget_violation_rate: Self::rate(records, TestRecord::over_budget),
        }
    }

    /// Share of all rows satisfying `pred`. Undefined for an empty table.
    pub fn rate<F>(records: &[TestRecord], pred: F) -> Option<f64>
    where
        F: Fn(&TestRecord) -> bool,
    {
        if records.is_empty() {
            return None;
        }
        let hits = records.iter().filter(|&r| pred(r)).count();
        Some(hits as f64 / records.len() as f64)
    }

    pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
        let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
