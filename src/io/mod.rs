//! Input/output helpers.
//!
//! - CSV feed parsing (`ingest`)
//! - JSON snapshot and per-feed CSV exports (`export`)

pub mod export;
pub mod ingest;

pub use export::{DashboardSnapshot, write_series_csv, write_snapshot_json};
pub use ingest::{ParseStats, parse, parse_with_stats};
