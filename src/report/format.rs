//! Terminal output: KPI cards, failed-feed advisory, chart tables.
//!
//! Formatting lives here so the pipeline and the KPI code never build strings.

use crate::dashboard::DomainCatalog;
use crate::data::FeedResults;
use crate::domain::{ChartSeriesSpec, DashboardDomain, FeedDescriptor, SeriesMark, TimeSeries};
use crate::kpi::KpiCard;
use crate::report::number::{DeltaClass, tooltip_with_prefix};

const DATE_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 28;

/// Header, one line per KPI card, then the advisory if any feed failed.
pub fn format_dashboard(domain: DashboardDomain, cards: &[KpiCard], results: &FeedResults) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== dash - {} ===\n", domain.display_name()));
    for card in cards {
        out.push_str(&format_card(card));
        out.push('\n');
    }

    let advisory = format_advisory(results);
    if !advisory.is_empty() {
        out.push('\n');
        out.push_str(&advisory);
    }

    out
}

/// `Label  headline  badge (window)`; snapshot metrics carry no badge.
pub fn format_card(card: &KpiCard) -> String {
    let mut line = format!(
        "{:<LABEL_WIDTH$} {:>10}",
        truncate(&card.label, LABEL_WIDTH),
        card.headline
    );
    if let Some(badge) = &card.delta {
        let arrow = match badge.class {
            DeltaClass::Positive => "▲",
            DeltaClass::Negative => "▼",
        };
        line.push_str(&format!(
            "  {arrow} {} ({})",
            badge.text,
            card.summary.delta_window.describe()
        ));
    }
    line
}

/// Non-fatal notice listing failed feeds; empty when all feeds loaded.
pub fn format_advisory(results: &FeedResults) -> String {
    let failures = results.failures();
    if failures.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("! Some feeds failed to load; the figures below them read as empty:\n");
    for (id, reason) in failures {
        out.push_str(&format!("  - {id}: {reason}\n"));
    }
    out
}

/// Axes and legend of a resolved chart, without data.
pub fn format_chart_spec(spec: &ChartSeriesSpec) -> String {
    let mut out = String::new();

    let mark = match spec.mark {
        SeriesMark::Bar => "bars",
        SeriesMark::Area => "area",
    };
    let layout = if spec.stacked { "stacked" } else { "single" };
    out.push_str(&format!("Chart: {} ({layout} {mark})\n", spec.metric_id));
    out.push_str(&format!("Left axis : {}\n", spec.left_axis_label));
    if let Some(right) = &spec.right_axis_label {
        out.push_str(&format!("Right axis: {right}\n"));
    }

    out.push_str("Series:\n");
    for s in &spec.series {
        out.push_str(&format!("  {} {:<16} key={}\n", s.color, s.label, s.key));
    }
    if let Some(line) = &spec.secondary_line {
        out.push_str(&format!("  {} {:<16} key={} (line, right axis)\n", line.color, line.label, line.key));
    }

    out
}

/// Chart legend followed by one row per record, values as tooltips would show them.
pub fn format_chart(spec: &ChartSeriesSpec, series: &TimeSeries) -> String {
    let mut out = format_chart_spec(spec);
    out.push('\n');

    if series.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let mut columns: Vec<(&str, &str)> = spec.series.iter().map(|s| (s.label.as_str(), s.key.as_str())).collect();
    if let Some(line) = &spec.secondary_line {
        columns.push((line.label.as_str(), line.key.as_str()));
    }

    let mut header = format!("{:<DATE_WIDTH$}", "date");
    let mut rule = format!("{:-<DATE_WIDTH$}", "");
    for (label, _) in &columns {
        header.push_str(&format!(" {:>VALUE_WIDTH$}", truncate(label, VALUE_WIDTH)));
        rule.push_str(&format!(" {:-<VALUE_WIDTH$}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for record in series {
        let mut row = format!("{:<DATE_WIDTH$}", truncate(record.date().unwrap_or(""), DATE_WIDTH));
        for (_, key) in &columns {
            let cell = tooltip_with_prefix(&spec.value_prefix, record.number(key));
            row.push_str(&format!(" {cell:>VALUE_WIDTH$}"));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

/// Feeds of a domain with their env var and whether a URL is configured.
pub fn format_feed_listing(catalog: &DomainCatalog, descriptors: &[FeedDescriptor]) -> String {
    let domain = catalog.domain;
    let mut out = String::new();
    out.push_str(&format!("{} ({domain})\n", domain.display_name()));
    for desc in descriptors {
        let env_var = catalog.feed(&desc.id).map(|f| f.env_var).unwrap_or("");
        let state = match &desc.url {
            Some(url) => url.as_str(),
            None => "(not configured)",
        };
        out.push_str(&format!("  {:<14} {:<38} {state}\n", desc.id, env_var));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
