use crate::chart::tables::{ChartEntry, ChartTemplate, SeriesTemplate, chart_table};
use crate::domain::{ChartSeriesSpec, DashboardDomain, SecondaryLine, SeriesEntry};

/// Chart spec for `metric_id` on `domain`.
///
/// `None` for KPI-only metrics and for metrics the domain does not know.
/// Repeated calls return identical specs.
pub fn resolve(domain: DashboardDomain, metric_id: &str) -> Option<ChartSeriesSpec> {
    let entry = lookup(domain, metric_id)?;
    entry.chart.map(|chart| build_spec(entry.metric_id, &chart))
}

/// Raw table entry, distinguishing "KPI-only" (`chart: None`) from "unknown" (`None`).
pub fn lookup(domain: DashboardDomain, metric_id: &str) -> Option<&'static ChartEntry> {
    chart_table(domain).iter().find(|e| e.metric_id == metric_id)
}

/// Metric ids that have a chart, in table order.
pub fn charted_metrics(domain: DashboardDomain) -> impl Iterator<Item = &'static str> {
    chart_table(domain)
        .iter()
        .filter(|e| e.chart.is_some())
        .map(|e| e.metric_id)
}

/// The metric selected when a page first opens.
pub fn default_metric(domain: DashboardDomain) -> Option<&'static str> {
    charted_metrics(domain).next()
}

fn build_spec(metric_id: &str, chart: &ChartTemplate) -> ChartSeriesSpec {
    ChartSeriesSpec {
        metric_id: metric_id.to_string(),
        left_axis_label: chart.left_axis_label.to_string(),
        right_axis_label: chart.right_axis_label.map(str::to_string),
        stacked: chart.stacked && chart.series.len() > 1,
        value_prefix: chart.value_prefix.to_string(),
        mark: chart.mark,
        series: chart.series.iter().map(series_entry).collect(),
        secondary_line: chart.secondary_line.as_ref().map(|line| SecondaryLine {
            key: line.key.to_string(),
            label: line.label.to_string(),
            color: line.color.to_string(),
        }),
    }
}

fn series_entry(template: &SeriesTemplate) -> SeriesEntry {
    SeriesEntry {
        key: template.key.to_string(),
        label: template.label.to_string(),
        color: template.color.to_string(),
    }
}
