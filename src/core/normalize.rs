//! Record Normalization Layer
//!
//! Converts loosely-typed raw rows into canonical `TestRecord`s. Nothing in
//! here fails: malformed values become "missing" and ambiguous booleans
//! resolve to `false`.

use crate::ingestion::{RawRecord, RawTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TRUE_TOKENS: [&str; 4] = ["true", "1", "yes", "y"];
const FALSE_TOKENS: [&str; 4] = ["false", "0", "no", "n"];

/// Cell spellings that mean "no value", as spreadsheet and dataframe exports
/// write them.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell is absent or spelled as a missing-value marker. Markers are
/// matched exactly, without trimming.
pub fn is_missing(raw: Option<&str>) -> bool {
    raw.map(|s| MISSING_MARKERS.contains(&s)).unwrap_or(true)
}

/// Text cell kept verbatim unless it is missing.
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        raw.map(str::to_string)
    }
}

/// Result of reading a textual boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolToken {
    True,
    False,
    /// Empty, missing, or outside both token sets
    Unrecognized,
}

impl BoolToken {
    pub fn parse(raw: Option<&str>) -> Self {
        let token = match raw {
            Some(s) => s.trim().to_lowercase(),
            None => return BoolToken::Unrecognized,
        };

        if TRUE_TOKENS.contains(&token.as_str()) {
            BoolToken::True
        } else if FALSE_TOKENS.contains(&token.as_str()) {
            BoolToken::False
        } else {
            BoolToken::Unrecognized
        }
    }

    /// Collapse to a plain boolean, counting unrecognized input as `false`.
    ///
    /// This conflates "explicitly false" with "unknown": a row whose
    /// faithfulness could not be read is reported as unfaithful and stays in
    /// the denominator.
    pub fn or_false(self) -> bool {
        matches!(self, BoolToken::True)
    }
}

/// Parse a numeric cell. Empty, unparsable, and non-finite values are missing.
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Canonical test-run record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub scenario: Option<String>,
    pub faithful: bool,
    pub disagreement_type: Option<String>,
    pub relevance_score: Option<f64>,
    pub toxicity_flag: Option<f64>,
    pub latency_ms: Option<f64>,
    pub budget_limit: Option<f64>,
    pub total_price: Option<f64>,
}

impl TestRecord {
    /// True only when both amounts are present and the price exceeds the limit.
    pub fn over_budget(&self) -> bool {
        match (self.total_price, self.budget_limit) {
            (Some(price), Some(limit)) => price > limit,
            _ => false,
        }
    }

    pub fn is_toxic(&self) -> bool {
        self.toxicity_flag == Some(1.0)
    }

    /// Exact, case-sensitive category match. A row without a category matches nothing.
    pub fn has_disagreement(&self, category: &str) -> bool {
        self.disagreement_type.as_deref() == Some(category)
    }

    /// Category label for presentation, with absent categories shown as "none".
    pub fn disagreement_label(&self) -> &str {
        self.disagreement_type.as_deref().unwrap_or("none")
    }
}

/// Tally of data-quality observations made while normalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationStats {
    pub rows: usize,
    pub unrecognized_faithful: usize,
    /// Numeric cells holding something other than a number or a missing
    /// marker, keyed by column
    pub unparsable_numeric: BTreeMap<String, usize>,
}

impl NormalizationStats {
    pub fn total_unparsable(&self) -> usize {
        self.unparsable_numeric.values().sum()
    }

    fn note_numeric(&mut self, column: &str, raw: Option<&str>, parsed: Option<f64>) {
        let blank = raw.map(|s| s.trim().is_empty()).unwrap_or(true);
        if !blank && !is_missing(raw) && parsed.is_none() {
            *self.unparsable_numeric.entry(column.to_string()).or_insert(0) += 1;
        }
    }
}

/// Record normalizer
pub struct Normalizer;

impl Normalizer {
    /// Normalize every row of a table. Row count and order are preserved.
    pub fn normalize(table: &RawTable) -> (Vec<TestRecord>, NormalizationStats) {
        let mut stats = NormalizationStats::default();
        let records = table
            .records
            .iter()
            .map(|raw| Self::normalize_record(raw, &mut stats))
            .collect();
        (records, stats)
    }

    pub fn normalize_record(raw: &RawRecord, stats: &mut NormalizationStats) -> TestRecord {
        stats.rows += 1;

        let faithful = BoolToken::parse(raw.faithful.as_deref());
        if faithful == BoolToken::Unrecognized {
            stats.unrecognized_faithful += 1;
        }

        let mut numeric = |column: &str, cell: &Option<String>| -> Option<f64> {
            let parsed = parse_numeric(cell.as_deref());
            stats.note_numeric(column, cell.as_deref(), parsed);
            parsed
        };

        let relevance_score = numeric("relevance_score", &raw.relevance_score);
        let toxicity_flag = numeric("toxicity_flag", &raw.toxicity_flag);
        let latency_ms = numeric("latency_ms", &raw.latency_ms);
        let budget_limit = numeric("budget_limit", &raw.budget_limit);
        let total_price = numeric("total_price", &raw.total_price);

        TestRecord {
            scenario: parse_text(raw.scenario.as_deref()),
            faithful: faithful.or_false(),
            disagreement_type: parse_text(raw.disagreement_type.as_deref()),
            relevance_score,
            toxicity_flag,
            latency_ms,
            budget_limit,
            total_price,
        }
    }
}
