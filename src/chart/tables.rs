//! Per-domain chart tables.
//!
//! Pure data: one entry per metric, `chart: None` for KPI-only metrics.
//! Colors are fixed so the same metric always draws the same way.

use crate::domain::{DashboardDomain, SeriesMark};

pub const ACCENT_PRIMARY: &str = "#2d2df1";
pub const ACCENT_SECONDARY: &str = "#17cac6";
pub const ACCENT_PURPLE: &str = "#9b51e0";
pub const ASSET_WHITE: &str = "#ffffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTemplate {
    pub left_axis_label: &'static str,
    pub right_axis_label: Option<&'static str>,
    /// Declared stacking; only honored with more than one series.
    pub stacked: bool,
    pub value_prefix: &'static str,
    pub mark: SeriesMark,
    pub series: &'static [SeriesTemplate],
    pub secondary_line: Option<SeriesTemplate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartEntry {
    pub metric_id: &'static str,
    pub chart: Option<ChartTemplate>,
}

const fn series(key: &'static str, label: &'static str, color: &'static str) -> SeriesTemplate {
    SeriesTemplate { key, label, color }
}

const fn single(
    left_axis_label: &'static str,
    value_prefix: &'static str,
    mark: SeriesMark,
    series: &'static [SeriesTemplate],
) -> ChartTemplate {
    ChartTemplate {
        left_axis_label,
        right_axis_label: None,
        stacked: false,
        value_prefix,
        mark,
        series,
        secondary_line: None,
    }
}

const fn stacked(
    left_axis_label: &'static str,
    value_prefix: &'static str,
    series: &'static [SeriesTemplate],
) -> ChartTemplate {
    ChartTemplate {
        left_axis_label,
        right_axis_label: None,
        stacked: true,
        value_prefix,
        mark: SeriesMark::Bar,
        series,
        secondary_line: None,
    }
}

/// Period bars on the left axis, running total as a line on the right.
const fn with_cumulative(
    mut chart: ChartTemplate,
    right_axis_label: &'static str,
    line: SeriesTemplate,
) -> ChartTemplate {
    chart.right_axis_label = Some(right_axis_label);
    chart.secondary_line = Some(line);
    chart
}

const fn charted(metric_id: &'static str, chart: ChartTemplate) -> ChartEntry {
    ChartEntry {
        metric_id,
        chart: Some(chart),
    }
}

const fn kpi_only(metric_id: &'static str) -> ChartEntry {
    ChartEntry { metric_id, chart: None }
}

const OVERVIEW_TRANSACTIONS: &[SeriesTemplate] = &[series("value", "Monthly Transactions", ACCENT_PRIMARY)];
const OVERVIEW_ACTIVE: &[SeriesTemplate] = &[series("value", "Monthly Active", ACCENT_PRIMARY)];
const OVERVIEW_VOLUME: &[SeriesTemplate] = &[series("value", "Monthly Volume", ACCENT_PRIMARY)];
const ACTIVE_ADDRESSES: &[SeriesTemplate] = &[series("total", "Active Addresses", ACCENT_PRIMARY)];
const MARKET_CAP: &[SeriesTemplate] = &[series("total", "Market Cap", ACCENT_PRIMARY)];
const MONTHLY_VOLUME: &[SeriesTemplate] = &[series("total", "Monthly Volume", ACCENT_PRIMARY)];
const TOTAL_TOKENIZED_PROPERTIES: &[SeriesTemplate] = &[series("total", "Total Tokenized Properties", ACCENT_PRIMARY)];
const DEPOSITED_AMOUNT: &[SeriesTemplate] = &[series("total", "Deposited Amount", ACCENT_PRIMARY)];
const BORROWED_AMOUNT: &[SeriesTemplate] = &[series("total", "Borrowed Amount", ACCENT_PRIMARY)];

const OVERVIEW: &[ChartEntry] = &[
    charted(
        "transactions",
        with_cumulative(
            single(
                "Monthly Transactions",
                "",
                SeriesMark::Bar,
                OVERVIEW_TRANSACTIONS,
            ),
            "Total Transactions",
            series("cumulative", "Total Transactions", ACCENT_SECONDARY),
        ),
    ),
    charted(
        "addresses",
        with_cumulative(
            single(
                "Monthly Active",
                "",
                SeriesMark::Bar,
                OVERVIEW_ACTIVE,
            ),
            "Total Unique",
            series("cumulative", "Total Unique", ACCENT_SECONDARY),
        ),
    ),
    charted(
        "volume",
        with_cumulative(
            single(
                "Monthly Volume ($)",
                "$",
                SeriesMark::Bar,
                OVERVIEW_VOLUME,
            ),
            "Total Volume ($)",
            series("cumulative", "Total Volume", ACCENT_SECONDARY),
        ),
    ),
];

const COMMODITY_ASSETS: &[SeriesTemplate] = &[
    series("gold_usd", "GOLD$", ACCENT_PRIMARY),
    series("silver_usd", "Silver$", ACCENT_SECONDARY),
    series("gold", "Gold", ASSET_WHITE),
];

const COMMODITIES: &[ChartEntry] = &[
    charted("market_cap", stacked("Market Cap ($)", "$", COMMODITY_ASSETS)),
    charted(
        "addresses",
        single(
            "Monthly Active Addresses",
            "",
            SeriesMark::Bar,
            ACTIVE_ADDRESSES,
        ),
    ),
    charted("volume", stacked("Monthly Volume ($)", "$", COMMODITY_ASSETS)),
    kpi_only("holders"),
];

const REAL_ESTATE: &[ChartEntry] = &[
    // Declared stacked, but a single series never stacks.
    charted(
        "market_cap",
        ChartTemplate {
            stacked: true,
            ..single(
                "Market Cap ($)",
                "$",
                SeriesMark::Area,
                MARKET_CAP,
            )
        },
    ),
    charted(
        "addresses",
        single(
            "Monthly Active Addresses",
            "",
            SeriesMark::Bar,
            ACTIVE_ADDRESSES,
        ),
    ),
    charted(
        "volume",
        single(
            "Monthly Volume ($)",
            "$",
            SeriesMark::Bar,
            MONTHLY_VOLUME,
        ),
    ),
    charted(
        "properties",
        single(
            "Total Properties",
            "",
            SeriesMark::Bar,
            TOTAL_TOKENIZED_PROPERTIES,
        ),
    ),
];

const PRIVATE_CREDIT: &[ChartEntry] = &[
    charted(
        "deposits",
        single(
            "Deposited Amount ($)",
            "$",
            SeriesMark::Area,
            DEPOSITED_AMOUNT,
        ),
    ),
    charted(
        "borrows",
        single(
            "Borrowed Amount ($)",
            "$",
            SeriesMark::Area,
            BORROWED_AMOUNT,
        ),
    ),
];

const PAYMENT_RAILS: &[SeriesTemplate] = &[
    series("algo", "ALGO", ACCENT_PRIMARY),
    series("stable", "Stablecoins", ACCENT_SECONDARY),
    series("hafn", "HAFN", ASSET_WHITE),
];

const MICROPAYMENTS: &[ChartEntry] = &[
    charted("transactions", stacked("Monthly Payments", "", PAYMENT_RAILS)),
    charted(
        "addresses",
        with_cumulative(
            stacked("Monthly Active", "", PAYMENT_RAILS),
            "Total Unique",
            series("total", "Total Unique", ACCENT_SECONDARY),
        ),
    ),
    charted("volume", stacked("Monthly Volume ($)", "$", PAYMENT_RAILS)),
];

/// All chart entries registered for `domain`, in display order.
pub fn chart_table(domain: DashboardDomain) -> &'static [ChartEntry] {
    match domain {
        DashboardDomain::Overview => OVERVIEW,
        DashboardDomain::Commodities => COMMODITIES,
        DashboardDomain::RealEstate => REAL_ESTATE,
        DashboardDomain::PrivateCredit => PRIVATE_CREDIT,
        DashboardDomain::Micropayments => MICROPAYMENTS,
    }
}
