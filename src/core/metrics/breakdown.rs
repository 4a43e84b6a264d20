//! Grouped Breakdowns
//!
//! Per-scenario rates and per-category counts for the report's charts.

use crate::core::normalize::TestRecord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mean of a boolean field within one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRate {
    pub key: String,
    pub rate: f64,
    pub rows: usize,
}

/// Occurrences of one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// All breakdowns, each already in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedBreakdowns {
    /// Faithfulness rate by scenario, highest first
    pub faithful_by_scenario: Vec<GroupRate>,
    /// Budget violation rate by scenario, highest first
    pub budget_violation_by_scenario: Vec<GroupRate>,
    /// Disagreement type counts, most frequent first
    pub disagreement_types: Vec<CategoryCount>,
}

/// Breakdown builder
pub struct BreakdownBuilder;

impl BreakdownBuilder {
    pub fn build(records: &[TestRecord]) -> GroupedBreakdowns {
        GroupedBreakdowns {
            faithful_by_scenario: Self::rate_by_scenario(records, |r| r.faithful),
            budget_violation_by_scenario: Self::rate_by_scenario(records, TestRecord::over_budget),
            disagreement_types: Self::disagreement_counts(records),
        }
    }

    /// Group by scenario and take the mean of `flag` in each group, sorted by
    /// descending rate. Rows without a scenario have no group. Ties keep the
    /// order in which scenarios first appear.
    pub fn rate_by_scenario<F>(records: &[TestRecord], flag: F) -> Vec<GroupRate>
    where
        F: Fn(&TestRecord) -> bool,
    {
        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();

        for record in records {
            let Some(scenario) = record.scenario.as_deref() else {
                continue;
            };
            let tally = tallies.entry(scenario).or_insert_with(|| {
                order.push(scenario);
                (0, 0)
            });
            tally.1 += 1;
            if flag(record) {
                tally.0 += 1;
            }
        }

        order
            .into_iter()
            .map(|key| {
                let (hits, rows) = tallies[key];
                GroupRate {
                    key: key.to_string(),
                    rate: hits as f64 / rows as f64,
                    rows,
                }
            })
            .sorted_by(|a, b| b.rate.total_cmp(&a.rate))
            .collect()
    }

    /// Count rows per presentation label ("none" for absent categories),
    /// most frequent first.
    pub fn disagreement_counts(records: &[TestRecord]) -> Vec<CategoryCount> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let label = record.disagreement_label();
            *counts.entry(label).or_insert_with(|| {
                order.push(label);
                0
            }) += 1;
        }

        order
            .into_iter()
            .map(|label| CategoryCount {
                label: label.to_string(),
                count: counts[label],
            })
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .collect()
    }
}
