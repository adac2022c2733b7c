//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - handed to a presentation layer as-is
//! - exported to JSON snapshots
//! - compared byte-for-byte in tests (chart specs must be stable)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A dashboard page. Each has its own feeds, KPI cards and chart table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardDomain {
    Overview,
    Commodities,
    RealEstate,
    PrivateCredit,
    Micropayments,
}

impl DashboardDomain {
    pub const ALL: [DashboardDomain; 5] = [
        DashboardDomain::Overview,
        DashboardDomain::Commodities,
        DashboardDomain::RealEstate,
        DashboardDomain::PrivateCredit,
        DashboardDomain::Micropayments,
    ];

    /// Identifier used on the command line and in exports.
    pub fn slug(self) -> &'static str {
        match self {
            DashboardDomain::Overview => "overview",
            DashboardDomain::Commodities => "commodities",
            DashboardDomain::RealEstate => "real-estate",
            DashboardDomain::PrivateCredit => "private-credit",
            DashboardDomain::Micropayments => "micropayments",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DashboardDomain::Overview => "Overview",
            DashboardDomain::Commodities => "Commodities",
            DashboardDomain::RealEstate => "Real Estate",
            DashboardDomain::PrivateCredit => "Private Credit",
            DashboardDomain::Micropayments => "Micropayments",
        }
    }
}

impl std::fmt::Display for DashboardDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which earlier point a KPI's current value is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaPolicy {
    /// Last record vs. the one before it.
    Adjacent,
    /// Last record vs. the record `n` positions earlier (positional, not calendar).
    LookbackN(usize),
    /// Snapshot metrics: never a delta.
    None,
}

impl DeltaPolicy {
    pub fn describe(self) -> String {
        match self {
            DeltaPolicy::Adjacent => "vs previous period".to_string(),
            DeltaPolicy::LookbackN(n) => format!("vs {n} periods ago"),
            DeltaPolicy::None => "snapshot".to_string(),
        }
    }
}

/// Headline value of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub metric_id: String,
    pub current_value: f64,
    /// Fractional change (`1.0` = +100%); `None` when undefined.
    pub delta: Option<f64>,
    pub delta_window: DeltaPolicy,
}

/// How the primary series are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMark {
    Bar,
    Area,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesEntry {
    pub key: String,
    pub label: String,
    pub color: String,
}

/// Cumulative line plotted against the right-hand axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryLine {
    pub key: String,
    pub label: String,
    pub color: String,
}

/// Resolved chart description for one (domain, metric) pair.
///
/// `series` is never empty; a metric without a chart resolves to `None`
/// rather than to a spec with no series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeriesSpec {
    pub metric_id: String,
    pub left_axis_label: String,
    pub right_axis_label: Option<String>,
    pub stacked: bool,
    pub value_prefix: String,
    pub mark: SeriesMark,
    pub series: Vec<SeriesEntry>,
    pub secondary_line: Option<SecondaryLine>,
}

impl ChartSeriesSpec {
    /// Every record field the chart reads, primary series first.
    pub fn value_keys(&self) -> impl Iterator<Item = &str> {
        self.series
            .iter()
            .map(|s| s.key.as_str())
            .chain(self.secondary_line.iter().map(|l| l.key.as_str()))
    }
}
