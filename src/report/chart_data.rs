//! Chart series written as CSV, one file per chart.

use crate::core::metrics::{CategoryCount, GroupRate, HistogramBin};
use crate::error::Result;
use csv::Writer;
use std::path::Path;

pub const FAITHFULNESS_BY_SCENARIO_FILE: &str = "faithfulness_by_scenario.csv";
pub const DISAGREEMENT_TYPES_FILE: &str = "disagreement_types.csv";
pub const LATENCY_HIST_FILE: &str = "latency_hist.csv";
pub const BUDGET_VIOLATIONS_FILE: &str = "budget_violations.csv";

pub fn write_group_rates(path: &Path, value_header: &str, rows: &[GroupRate]) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["scenario", value_header, "tests"])?;
    for row in rows {
        wtr.write_record([row.key.clone(), row.rate.to_string(), row.rows.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_category_counts(path: &Path, rows: &[CategoryCount]) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["type", "count"])?;
    for row in rows {
        wtr.write_record([row.label.clone(), row.count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_histogram(path: &Path, bins: &[HistogramBin]) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["lower_ms", "upper_ms", "frequency"])?;
    for bin in bins {
        wtr.write_record([
            bin.lower.to_string(),
            bin.upper.to_string(),
            bin.count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
