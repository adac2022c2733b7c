//! Static per-domain catalog: feeds (with their schemas) and KPI cards.
//!
//! Adding a feed type means adding a schema and a row here; no new code paths.

use crate::chart::{self, tables::{ACCENT_PRIMARY, ACCENT_PURPLE, ACCENT_SECONDARY}};
use crate::domain::{ColumnRule, DashboardDomain, DeltaPolicy, Schema};

/// One feed of a domain. The URL is read from `env_var` at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedSpec {
    pub id: &'static str,
    pub env_var: &'static str,
    pub schema: Schema,
}

/// One headline card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiDefinition {
    pub metric_id: &'static str,
    pub label: &'static str,
    pub feed_id: &'static str,
    pub value_field: &'static str,
    pub policy: DeltaPolicy,
    /// Currency prefix for the headline value (`"$"` or `""`).
    pub value_prefix: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainCatalog {
    pub domain: DashboardDomain,
    pub feeds: &'static [FeedSpec],
    pub kpis: &'static [KpiDefinition],
}

impl DomainCatalog {
    pub fn feed(&self, feed_id: &str) -> Option<&'static FeedSpec> {
        self.feeds.iter().find(|f| f.id == feed_id)
    }

    pub fn kpi(&self, metric_id: &str) -> Option<&'static KpiDefinition> {
        self.kpis.iter().find(|k| k.metric_id == metric_id)
    }

    pub fn has_chart(&self, metric_id: &str) -> bool {
        chart::resolve(self.domain, metric_id).is_some()
    }
}

/// Rolling 30-period comparison for slow-moving balance figures.
const LOOKBACK_30: DeltaPolicy = DeltaPolicy::LookbackN(30);

// --- schemas ---------------------------------------------------------------

const PERIOD_WITH_CUMULATIVE_INT: &[ColumnRule] = &[
    ColumnRule::date(0),
    ColumnRule::int(1, "value"),
    ColumnRule::int(2, "cumulative"),
];

const PERIOD_WITH_CUMULATIVE_FLOAT: &[ColumnRule] = &[
    ColumnRule::date(0),
    ColumnRule::float(1, "value"),
    ColumnRule::float(2, "cumulative"),
];

const DATED_TOTAL: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(1, "total")];

const COMMODITY_BREAKDOWN: &[ColumnRule] = &[
    ColumnRule::date(0),
    ColumnRule::int(1, "total"),
    ColumnRule::int(2, "gold_usd"),
    ColumnRule::int(3, "silver_usd"),
    ColumnRule::int(4, "gold"),
];

const HOLDER_COUNT: &[ColumnRule] = &[ColumnRule::int(0, "total")];

const REAL_ESTATE_VOLUME: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(7, "total")];

const PROPERTY_COUNT: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(2, "total")];

const PAYMENT_RAIL_COUNTS: &[ColumnRule] = &[
    ColumnRule::date(0),
    ColumnRule::int(1, "algo"),
    ColumnRule::int(2, "stable"),
    ColumnRule::int(3, "hafn"),
    ColumnRule::int(4, "total"),
];

const PAYMENT_RAIL_VOLUME: &[ColumnRule] = &[
    ColumnRule::date(0),
    ColumnRule::float(1, "algo"),
    ColumnRule::float(2, "stable"),
    ColumnRule::float(6, "hafn"),
    ColumnRule::float(3, "total"),
];

// --- helpers ---------------------------------------------------------------

const fn feed(id: &'static str, env_var: &'static str, schema_id: &'static str, rules: &'static [ColumnRule]) -> FeedSpec {
    FeedSpec {
        id,
        env_var,
        schema: Schema::new(schema_id, rules),
    }
}

const fn kpi(
    metric_id: &'static str,
    label: &'static str,
    value_field: &'static str,
    policy: DeltaPolicy,
    value_prefix: &'static str,
) -> KpiDefinition {
    KpiDefinition {
        metric_id,
        label,
        feed_id: metric_id,
        value_field,
        policy,
        value_prefix,
        color: ACCENT_PRIMARY,
    }
}

const fn colored(mut def: KpiDefinition, color: &'static str) -> KpiDefinition {
    def.color = color;
    def
}

// --- domains ---------------------------------------------------------------

const OVERVIEW: DomainCatalog = DomainCatalog {
    domain: DashboardDomain::Overview,
    feeds: &[
        feed("transactions", "DASHBOARD_OVERVIEW_TRANSACTIONS", "overview/transactions", PERIOD_WITH_CUMULATIVE_INT),
        feed("addresses", "DASHBOARD_OVERVIEW_ADDRESSES", "overview/addresses", PERIOD_WITH_CUMULATIVE_INT),
        feed("volume", "DASHBOARD_OVERVIEW_VOLUME", "overview/volume", PERIOD_WITH_CUMULATIVE_FLOAT),
    ],
    kpis: &[
        kpi("transactions", "Monthly Transactions", "value", DeltaPolicy::Adjacent, ""),
        kpi("addresses", "Monthly Active Addresses", "value", DeltaPolicy::Adjacent, ""),
        kpi("volume", "Monthly USDC Volume", "value", DeltaPolicy::Adjacent, "$"),
    ],
};

const COMMODITIES: DomainCatalog = DomainCatalog {
    domain: DashboardDomain::Commodities,
    feeds: &[
        feed("market_cap", "DASHBOARD_COMMODITIES_MARKETCAP", "commodities/market_cap", COMMODITY_BREAKDOWN),
        feed("addresses", "DASHBOARD_COMMODITIES_ADDRESSES", "commodities/addresses", DATED_TOTAL),
        feed("volume", "DASHBOARD_COMMODITIES_VOLUME", "commodities/volume", COMMODITY_BREAKDOWN),
        feed("holders", "DASHBOARD_COMMODITIES_HOLDERS", "commodities/holders", HOLDER_COUNT),
    ],
    kpis: &[
        kpi("market_cap", "Stablecoins Market Cap", "total", DeltaPolicy::Adjacent, "$"),
        kpi("addresses", "Monthly Active Addresses", "total", DeltaPolicy::Adjacent, ""),
        kpi("volume", "Monthly Volume", "total", DeltaPolicy::Adjacent, "$"),
        kpi("holders", "Total Stablecoin Holders", "total", DeltaPolicy::None, ""),
    ],
};

const REAL_ESTATE: DomainCatalog = DomainCatalog {
    domain: DashboardDomain::RealEstate,
    feeds: &[
        feed("market_cap", "DASHBOARD_REALESTATE_MARKETCAP", "real-estate/market_cap", DATED_TOTAL),
        feed("addresses", "DASHBOARD_REALESTATE_ADDRESSES", "real-estate/addresses", DATED_TOTAL),
        feed("volume", "DASHBOARD_REALESTATE_VOLUME", "real-estate/volume", REAL_ESTATE_VOLUME),
        feed("properties", "DASHBOARD_REALESTATE_PROPERTIES", "real-estate/properties", PROPERTY_COUNT),
    ],
    kpis: &[
        kpi("market_cap", "Real Estate Market Cap", "total", LOOKBACK_30, "$"),
        kpi("addresses", "Monthly Active Addresses", "total", DeltaPolicy::Adjacent, ""),
        kpi("volume", "Monthly Volume", "total", DeltaPolicy::Adjacent, "$"),
        kpi("properties", "Total Properties", "total", DeltaPolicy::None, ""),
    ],
};

const PRIVATE_CREDIT: DomainCatalog = DomainCatalog {
    domain: DashboardDomain::PrivateCredit,
    feeds: &[
        feed("deposits", "DASHBOARD_PRIVATECREDIT_DEPOSITS", "private-credit/deposits", DATED_TOTAL),
        feed("borrows", "DASHBOARD_PRIVATECREDIT_BORROWS", "private-credit/borrows", DATED_TOTAL),
    ],
    kpis: &[
        kpi("deposits", "Deposits", "total", LOOKBACK_30, "$"),
        kpi("borrows", "Borrows", "total", LOOKBACK_30, "$"),
    ],
};

const MICROPAYMENTS: DomainCatalog = DomainCatalog {
    domain: DashboardDomain::Micropayments,
    feeds: &[
        feed("transactions", "DASHBOARD_MICROPAYMENTS_TRANSACTIONS", "micropayments/transactions", PAYMENT_RAIL_COUNTS),
        feed("addresses", "DASHBOARD_MICROPAYMENTS_ADDRESSES", "micropayments/addresses", PAYMENT_RAIL_COUNTS),
        feed("volume", "DASHBOARD_MICROPAYMENTS_VOLUME", "micropayments/volume", PAYMENT_RAIL_VOLUME),
    ],
    kpis: &[
        kpi("transactions", "Total Payments", "total", DeltaPolicy::Adjacent, ""),
        colored(
            kpi("addresses", "Total Unique Addresses", "total", DeltaPolicy::Adjacent, ""),
            ACCENT_SECONDARY,
        ),
        colored(
            kpi("volume", "Total Volume", "total", DeltaPolicy::Adjacent, "$"),
            ACCENT_PURPLE,
        ),
    ],
};

pub fn catalog(domain: DashboardDomain) -> &'static DomainCatalog {
    match domain {
        DashboardDomain::Overview => &OVERVIEW,
        DashboardDomain::Commodities => &COMMODITIES,
        DashboardDomain::RealEstate => &REAL_ESTATE,
        DashboardDomain::PrivateCredit => &PRIVATE_CREDIT,
        DashboardDomain::Micropayments => &MICROPAYMENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::chart::tables::chart_table;

    #[test]
    fn kpis_point_at_existing_feeds_and_fields() {
        for domain in DashboardDomain::ALL {
            let cat = catalog(domain);
            assert_eq!(cat.domain, domain);
            for def in cat.kpis {
                let feed = cat
                    .feed(def.feed_id)
                    .unwrap_or_else(|| panic!("{domain}/{}: unknown feed", def.metric_id));
                assert!(
                    feed.schema.has_field(def.value_field),
                    "{domain}/{}: schema lacks `{}`",
                    def.metric_id,
                    def.value_field
                );
            }
        }
    }

    #[test]
    fn chart_keys_exist_in_the_backing_schema() {
        for domain in DashboardDomain::ALL {
            let cat = catalog(domain);
            for metric in chart::charted_metrics(domain) {
                let def = cat.kpi(metric).unwrap_or_else(|| panic!("{domain}/{metric}: no KPI"));
                let schema = cat.feed(def.feed_id).unwrap().schema;
                let spec = chart::resolve(domain, metric).unwrap();
                for key in spec.value_keys() {
                    assert!(schema.has_field(key), "{domain}/{metric}: schema lacks `{key}`");
                }
            }
        }
    }

    #[test]
    fn every_kpi_has_a_chart_table_entry() {
        for domain in DashboardDomain::ALL {
            let table: HashSet<_> = chart_table(domain).iter().map(|e| e.metric_id).collect();
            for def in catalog(domain).kpis {
                assert!(table.contains(def.metric_id), "{domain}/{}", def.metric_id);
            }
        }
    }

    #[test]
    fn ids_and_env_vars_are_unique() {
        let mut env_vars = HashSet::new();
        for domain in DashboardDomain::ALL {
            let cat = catalog(domain);
            let mut ids = HashSet::new();
            for feed in cat.feeds {
                assert!(ids.insert(feed.id), "{domain}: duplicate feed {}", feed.id);
                assert!(env_vars.insert(feed.env_var), "duplicate env var {}", feed.env_var);
            }
        }
    }

    #[test]
    fn snapshot_metrics_use_no_delta() {
        let holders = catalog(DashboardDomain::Commodities).kpi("holders").unwrap();
        assert_eq!(holders.policy, DeltaPolicy::None);
        assert!(!catalog(DashboardDomain::Commodities).feed("holders").unwrap().schema.is_time_indexed());

        let properties = catalog(DashboardDomain::RealEstate).kpi("properties").unwrap();
        assert_eq!(properties.policy, DeltaPolicy::None);

        let market_cap = catalog(DashboardDomain::RealEstate).kpi("market_cap").unwrap();
        assert_eq!(market_cap.policy, DeltaPolicy::LookbackN(30));
    }
}
