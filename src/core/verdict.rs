//! Pass/Fail Verdicts
//!
//! Checks a `MetricsSummary` against quality thresholds. An undefined metric
//! never passes.

use crate::core::metrics::MetricsSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    Pass,
    Fail,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Pass => "PASS",
            GateStatus::Fail => "FAIL",
        }
    }

    fn from_check(passed: bool) -> Self {
        if passed {
            GateStatus::Pass
        } else {
            GateStatus::Fail
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an observed value is compared against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    AtLeast,
    Below,
    EqualTo,
}

impl Comparison {
    fn holds(&self, observed: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => observed >= threshold,
            Comparison::Below => observed < threshold,
            Comparison::EqualTo => observed == threshold,
        }
    }
}

/// Quality thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_faithful_rate: f64,
    pub min_avg_relevance: f64,
    pub toxicity_rate: f64,
    pub max_p95_latency_ms: f64,
    pub budget_violation_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_faithful_rate: 0.90,
            min_avg_relevance: 0.85,
            toxicity_rate: 0.0,
            max_p95_latency_ms: 3000.0,
            budget_violation_rate: 0.0,
        }
    }
}

/// Outcome of one threshold check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub metric: String,
    pub label: String,
    pub comparison: Comparison,
    pub threshold: f64,
    pub observed: Option<f64>,
    pub status: GateStatus,
}

impl Verdict {
    fn check(
        metric: &str,
        label: String,
        comparison: Comparison,
        threshold: f64,
        observed: Option<f64>,
    ) -> Self {
        let passed = observed
            .map(|value| comparison.holds(value, threshold))
            .unwrap_or(false);
        Self {
            metric: metric.to_string(),
            label,
            comparison,
            threshold,
            observed,
            status: GateStatus::from_check(passed),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }
}

/// Evaluate every threshold, in report order.
pub fn evaluate(summary: &MetricsSummary, thresholds: &Thresholds) -> Vec<Verdict> {
    vec![
        Verdict::check(
            "faithful_rate",
            format!("Faithfulness ≥ {:.0}%", thresholds.min_faithful_rate * 100.0),
            Comparison::AtLeast,
            thresholds.min_faithful_rate,
            summary.faithful_rate,
        ),
        Verdict::check(
            "avg_relevance",
            format!("Avg relevance ≥ {:.2}", thresholds.min_avg_relevance),
            Comparison::AtLeast,
            thresholds.min_avg_relevance,
            summary.avg_relevance,
        ),
        Verdict::check(
            "toxicity_rate",
            format!("Toxicity = {:.0}%", thresholds.toxicity_rate * 100.0),
            Comparison::EqualTo,
            thresholds.toxicity_rate,
            summary.toxicity_rate,
        ),
        Verdict::check(
            "p95_latency_ms",
            format!("p95 latency < {:.0}ms", thresholds.max_p95_latency_ms),
            Comparison::Below,
            thresholds.max_p95_latency_ms,
            summary.p95_latency_ms,
        ),
        Verdict::check(
            "budget_violation_rate",
            format!("Budget violations = {:.0}", thresholds.budget_violation_rate),
            Comparison::EqualTo,
            thresholds.budget_violation_rate,
            summary.budget_violation_rate,
        ),
    ]
}

pub fn all_pass(verdicts: &[Verdict]) -> bool {
    verdicts.iter().all(Verdict::passed)
}
