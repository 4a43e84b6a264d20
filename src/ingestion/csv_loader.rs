//! CSV Loader - Reads a test-run results file into a raw table

use crate::error::{ReportError, Result};
use crate::ingestion::{RawRecord, RawTable, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// CSV Loader - Wraps CSV text and converts it into raw, untyped records.
pub struct CsvLoader {
    source_id: String,
    csv_text: String,
}

impl CsvLoader {
    pub fn new(source_id: String, csv_text: String) -> Self {
        Self { source_id, csv_text }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let csv_text = fs::read_to_string(path)?;
        Ok(Self {
            source_id: path.display().to_string(),
            csv_text,
        })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Parse the CSV text. Extra columns are ignored; every required column
    /// must be present in the header row.
    pub fn load(&self) -> Result<RawTable> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.csv_text.as_bytes());

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();

        let positions = Self::resolve_columns(&headers)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result?;
            records.push(Self::to_raw_record(&record, &positions));
        }

        debug!(
            source = %self.source_id,
            rows = records.len(),
            columns = headers.len(),
            "Loaded CSV table"
        );

        Ok(RawTable {
            source_id: self.source_id.clone(),
            records,
        })
    }

    fn resolve_columns(headers: &[String]) -> Result<HashMap<&'static str, usize>> {
        let mut positions = HashMap::new();
        let mut missing = Vec::new();

        for column in REQUIRED_COLUMNS {
            match headers.iter().position(|h| h == column) {
                Some(idx) => {
                    positions.insert(column, idx);
                }
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ReportError::MissingColumns(missing));
        }

        Ok(positions)
    }

    fn to_raw_record(record: &StringRecord, positions: &HashMap<&'static str, usize>) -> RawRecord {
        // Short rows are allowed by the flexible reader; absent cells read as None.
        let cell = |name: &str| -> Option<String> {
            positions
                .get(name)
                .and_then(|idx| record.get(*idx))
                .map(|s| s.to_string())
        };

        RawRecord {
            scenario: cell("scenario"),
            faithful: cell("faithful"),
            disagreement_type: cell("disagreement_type"),
            relevance_score: cell("relevance_score"),
            toxicity_flag: cell("toxicity_flag"),
            latency_ms: cell("latency_ms"),
            budget_limit: cell("budget_limit"),
            total_price: cell("total_price"),
        }
    }
}
