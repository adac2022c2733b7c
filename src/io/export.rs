//! Export a dashboard run to JSON, or one feed's series to CSV.
//!
//! The JSON snapshot is self-contained: cards, chart specs, and the raw
//! series each chart reads, so downstream tools never refetch.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::pipeline::DashboardRun;
use crate::domain::{ChartSeriesSpec, DashboardDomain, FeedResult, Value};
use crate::error::AppError;
use crate::kpi::KpiCard;

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub tool: &'static str,
    pub domain: DashboardDomain,
    pub generated_at: DateTime<Utc>,
    pub cards: &'a [KpiCard],
    pub charts: Vec<ChartSeriesSpec>,
    pub feeds: Vec<FeedSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FeedSnapshot<'a> {
    pub id: &'a str,
    pub url: Option<&'a str>,
    pub result: Option<&'a FeedResult>,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn new(run: &'a DashboardRun, generated_at: DateTime<Utc>) -> Self {
        let feeds = run
            .descriptors
            .iter()
            .map(|d| FeedSnapshot {
                id: &d.id,
                url: d.url.as_deref(),
                result: run.results.get(&d.id),
            })
            .collect();
        Self {
            tool: "dash",
            domain: run.domain,
            generated_at,
            cards: &run.cards,
            charts: run.charts(),
            feeds,
        }
    }
}

/// Write the run as pretty JSON.
pub fn write_snapshot_json(path: &Path, run: &DashboardRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let snapshot = DashboardSnapshot::new(run, Utc::now());
    serde_json::to_writer_pretty(file, &snapshot)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), feeds = snapshot.feeds.len(), "wrote snapshot");
    Ok(())
}

/// Write one feed's series as CSV, columns in schema order.
///
/// A failed or unconfigured feed writes the header only.
pub fn write_series_csv(path: &Path, run: &DashboardRun, feed_id: &str) -> Result<(), AppError> {
    let feed = run.catalog().feed(feed_id).ok_or_else(|| {
        let known: Vec<_> = run.catalog().feeds.iter().map(|f| f.id).collect();
        AppError::usage(format!(
            "unknown feed '{feed_id}' for {} (known: {})",
            run.domain,
            known.join(", ")
        ))
    })?;

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let write_err = |e: csv::Error| AppError::new(4, format!("Failed to write export CSV row: {e}"));

    let fields: Vec<&str> = feed.schema.fields().collect();
    writer.write_record(&fields).map_err(write_err)?;

    let series = run.results.series(feed_id);
    for record in series {
        let row: Vec<String> = fields
            .iter()
            .map(|f| record.get(f).map(Value::to_string).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), feed = feed_id, rows = series.len(), "wrote series");
    Ok(())
}
