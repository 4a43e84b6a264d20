//! Runtime configuration for a report run.

use crate::core::Thresholds;
use crate::error::{ReportError, Result};
use std::path::PathBuf;

pub const OUT_DIR_ENV: &str = "ASK_RALPH_OUT_DIR";
pub const DEFAULT_OUT_DIR: &str = "artifacts";
pub const DEFAULT_HISTOGRAM_BINS: usize = 6;

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub out_dir: PathBuf,
    pub histogram_bins: usize,
    pub print_json: bool,
    pub thresholds: Thresholds,
}

impl ReportConfig {
    pub fn new(input_path: PathBuf, out_dir: PathBuf, histogram_bins: usize) -> Result<Self> {
        if histogram_bins == 0 {
            return Err(ReportError::InvalidConfig(
                "histogram bins must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            input_path,
            out_dir,
            histogram_bins,
            print_json: false,
            thresholds: Thresholds::default(),
        })
    }

    pub fn with_print_json(mut self, print_json: bool) -> Self {
        self.print_json = print_json;
        self
    }

    /// Output directory from the command line, else the environment, else the default.
    pub fn resolve_out_dir(cli_value: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
        cli_value
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }
}
