//! Shared dashboard pipeline used by `show` and `export`.
//!
//! descriptors -> concurrent ingest -> KPI cards, plus chart lookup against
//! the ingested series.

use crate::chart;
use crate::dashboard::{DomainCatalog, catalog};
use crate::data::{FeedResults, TabularFetcher, ingest};
use crate::domain::{ChartSeriesSpec, DashboardDomain, FeedDescriptor, TimeSeries};
use crate::error::AppError;
use crate::kpi::{KpiCard, build_cards};

/// Everything one ingestion pass of a domain produced.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub domain: DashboardDomain,
    pub descriptors: Vec<FeedDescriptor>,
    pub results: FeedResults,
    pub cards: Vec<KpiCard>,
}

/// Ingest every feed of `domain` and build its KPI cards.
///
/// Never fails: feed problems surface as `FeedResult::Failure` entries and
/// empty cards.
pub fn run_dashboard(domain: DashboardDomain, fetcher: &dyn TabularFetcher, descriptors: Vec<FeedDescriptor>) -> DashboardRun {
    let cat = catalog(domain);
    let results = ingest(fetcher, &descriptors);
    let cards = build_cards(cat, &results);
    DashboardRun {
        domain,
        descriptors,
        results,
        cards,
    }
}

impl DashboardRun {
    pub fn catalog(&self) -> &'static DomainCatalog {
        catalog(self.domain)
    }

    /// Resolved chart for `metric_id` and the series it draws from.
    pub fn chart(&self, metric_id: &str) -> Result<(ChartSeriesSpec, &TimeSeries), AppError> {
        let def = self.catalog().kpi(metric_id).ok_or_else(|| unknown_metric(self.domain, metric_id))?;
        let spec = chart_for(self.domain, metric_id)?;
        Ok((spec, self.results.series(def.feed_id)))
    }

    /// Every chart the domain can draw, in table order.
    pub fn charts(&self) -> Vec<ChartSeriesSpec> {
        chart::charted_metrics(self.domain)
            .filter_map(|m| chart::resolve(self.domain, m))
            .collect()
    }
}

/// Resolve a chart, mapping "unknown" and "KPI-only" to distinct errors.
pub fn chart_for(domain: DashboardDomain, metric_id: &str) -> Result<ChartSeriesSpec, AppError> {
    if chart::lookup(domain, metric_id).is_none() {
        return Err(unknown_metric(domain, metric_id));
    }
    chart::resolve(domain, metric_id)
        .ok_or_else(|| AppError::new(3, format!("'{metric_id}' on {domain} is a headline figure only; it has no chart.")))
}

fn unknown_metric(domain: DashboardDomain, metric_id: &str) -> AppError {
    let known: Vec<_> = catalog(domain).kpis.iter().map(|k| k.metric_id).collect();
    AppError::usage(format!(
        "unknown metric '{metric_id}' for {domain} (known: {})",
        known.join(", ")
    ))
}
