//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - feed shape and decoded data (`Schema`, `Record`, `TimeSeries`, `FeedResult`)
//! - dashboard pages (`DashboardDomain`)
//! - derived outputs (`KpiSummary`, `ChartSeriesSpec`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
