//! Core Metrics Module
//!
//! Run summary, grouped breakdowns, and the sample statistics they rely on.

pub mod breakdown;
pub mod histogram;
pub mod quantile;
pub mod summary;

pub use breakdown::{BreakdownBuilder, CategoryCount, GroupRate, GroupedBreakdowns};
pub use histogram::{histogram, HistogramBin};
pub use quantile::quantile_sorted;
pub use summary::{Aggregator, MetricsSummary};
