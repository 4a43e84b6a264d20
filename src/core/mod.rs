//! Core evaluation logic: normalization, aggregation, and verdicts.
//!
//! Pure functions over in-memory tables. Nothing here touches the filesystem.

pub mod metrics;
pub mod normalize;
pub mod verdict;

pub use metrics::{GroupedBreakdowns, MetricsSummary};
pub use normalize::{BoolToken, NormalizationStats, Normalizer, TestRecord};
pub use verdict::{evaluate, GateStatus, Thresholds, Verdict};

use crate::ingestion::RawTable;
use metrics::{Aggregator, BreakdownBuilder};

/// Compute the run summary and grouped breakdowns for normalized records.
pub fn compute(records: &[TestRecord]) -> (MetricsSummary, GroupedBreakdowns) {
    (
        Aggregator::summarize(records),
        BreakdownBuilder::build(records),
    )
}

/// Normalize a raw table, then compute.
pub fn compute_raw(table: &RawTable) -> (MetricsSummary, GroupedBreakdowns) {
    let (records, _) = Normalizer::normalize(table);
    compute(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::RawRecord;

    fn raw(scenario: &str, faithful: &str, category: Option<&str>) -> RawRecord {
        RawRecord {
            scenario: Some(scenario.to_string()),
            faithful: Some(faithful.to_string()),
            disagreement_type: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_n_tests_matches_row_count() {
        for n in [0usize, 1, 7] {
            let rows = (0..n).map(|_| raw("A", "yes", None)).collect();
            let (summary, _) = compute_raw(&RawTable::new("inline", rows));
            assert_eq!(summary.n_tests, n);
        }
    }

    #[test]
    fn test_compute_raw_end_to_end() {
        let table = RawTable::new(
            "inline",
            vec![
                raw("A", "TRUE", None),
                raw("A", "false", Some("contradiction")),
                raw("B", "y", Some("")),
                raw("B", "???", Some("unsupported")),
            ],
        );

        let (summary, breakdowns) = compute_raw(&table);
        assert_eq!(summary.n_tests, 4);
        assert_eq!(summary.faithful_rate, Some(0.5));
        assert_eq!(summary.contradiction_rate, Some(0.25));
        assert_eq!(summary.unsupported_rate, Some(0.25));
        assert_eq!(summary.avg_relevance, None);

        // Missing flags and amounts count as clean rows; missing scores and
        // latencies leave their metrics undefined.
        let statuses: Vec<GateStatus> = evaluate(&summary, &Thresholds::default())
            .into_iter()
            .map(|v| v.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                GateStatus::Fail,
                GateStatus::Fail,
                GateStatus::Pass,
                GateStatus::Fail,
                GateStatus::Pass,
            ]
        );

        let none = breakdowns
            .disagreement_types
            .iter()
            .find(|c| c.label == "none")
            .unwrap();
        assert_eq!(none.count, 2);
        assert_eq!(breakdowns.faithful_by_scenario.len(), 2);
    }

    #[test]
    fn test_padded_and_marker_categories_do_not_match() {
        let table = RawTable::new(
            "inline",
            vec![
                raw("A", "no", Some(" contradiction ")),
                raw("A", "no", Some("NA")),
            ],
        );

        let (summary, breakdowns) = compute_raw(&table);
        assert_eq!(summary.contradiction_rate, Some(0.0));

        let labels: Vec<(&str, usize)> = breakdowns
            .disagreement_types
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(labels, vec![(" contradiction ", 1), ("none", 1)]);
    }
}
