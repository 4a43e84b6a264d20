pub mod config;
pub mod core;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod pipeline;
pub mod report;

pub use crate::core::{compute, compute_raw};
pub use error::{ReportError, Result};
