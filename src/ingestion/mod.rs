//! Ingestion Module
//!
//! Loads test-run result files into raw, untyped tables. No interpretation of
//! cell values happens here; that is the normalizer's job.

pub mod csv_loader;

pub use csv_loader::CsvLoader;

/// Columns every results file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "scenario",
    "faithful",
    "disagreement_type",
    "relevance_score",
    "toxicity_flag",
    "latency_ms",
    "budget_limit",
    "total_price",
];

/// One row exactly as it appeared in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub scenario: Option<String>,
    pub faithful: Option<String>,
    pub disagreement_type: Option<String>,
    pub relevance_score: Option<String>,
    pub toxicity_flag: Option<String>,
    pub latency_ms: Option<String>,
    pub budget_limit: Option<String>,
    pub total_price: Option<String>,
}

/// A loaded results table.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub source_id: String,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(source_id: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            source_id: source_id.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
