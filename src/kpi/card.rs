use serde::Serialize;

use crate::dashboard::{DomainCatalog, KpiDefinition};
use crate::data::FeedResults;
use crate::domain::KpiSummary;
use crate::kpi::engine::summarize;
use crate::report::number::{DeltaBadge, compact, delta};

/// A headline card ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub color: String,
    pub value_prefix: String,
    pub summary: KpiSummary,
    /// `value_prefix` + compact value, e.g. `"$1.2M"`.
    pub headline: String,
    pub delta: Option<DeltaBadge>,
    pub has_chart: bool,
}

impl KpiCard {
    pub fn build(def: &KpiDefinition, results: &FeedResults, has_chart: bool) -> Self {
        let summary = summarize(def.metric_id, results.series(def.feed_id), def.value_field, def.policy);
        Self {
            label: def.label.to_string(),
            color: def.color.to_string(),
            value_prefix: def.value_prefix.to_string(),
            headline: format!("{}{}", def.value_prefix, compact(summary.current_value)),
            delta: delta(summary.delta),
            summary,
            has_chart,
        }
    }

    pub fn metric_id(&self) -> &str {
        &self.summary.metric_id
    }
}

/// One card per KPI of `catalog`, in catalog order.
pub fn build_cards(catalog: &DomainCatalog, results: &FeedResults) -> Vec<KpiCard> {
    catalog
        .kpis
        .iter()
        .map(|def| KpiCard::build(def, results, catalog.has_chart(def.metric_id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::catalog;
    use crate::domain::{DashboardDomain, FeedResult};
    use crate::io::ingest::parse;
    use crate::report::number::DeltaClass;

    fn results_for(domain: DashboardDomain, bodies: &[(&str, &str)]) -> FeedResults {
        let cat = catalog(domain);
        bodies
            .iter()
            .map(|(id, body)| {
                let schema = cat.feed(id).unwrap().schema;
                (id.to_string(), FeedResult::Success(parse(body, &schema)))
            })
            .collect()
    }

    #[test]
    fn overview_cards_from_parsed_feeds() {
        let results = results_for(
            DashboardDomain::Overview,
            &[
                ("transactions", "date,value,cumulative\n2024-01,10,10\n2024-02,20,30\n2024-03,40,70\n"),
                ("volume", "date,value,cumulative\n2024-01,1000.5,1000.5\n2024-02,1500000,1501000.5\n"),
            ],
        );
        let cards = build_cards(catalog(DashboardDomain::Overview), &results);
        assert_eq!(cards.len(), 3);

        let tx = &cards[0];
        assert_eq!(tx.metric_id(), "transactions");
        assert_eq!(tx.headline, "40");
        let badge = tx.delta.as_ref().unwrap();
        assert_eq!(badge.text, "+100.00%");
        assert_eq!(badge.class, DeltaClass::Positive);
        assert!(tx.has_chart);

        // No URL configured: empty state, not an error.
        let addresses = &cards[1];
        assert_eq!(addresses.headline, "0");
        assert_eq!(addresses.delta, None);

        assert_eq!(cards[2].headline, "$1.5M");
    }

    #[test]
    fn failed_feed_reads_as_empty_card() {
        let results: FeedResults = vec![(
            "deposits".to_string(),
            FeedResult::Failure("https://example.test/d.csv returned status 500".to_string()),
        )]
        .into_iter()
        .collect();
        let cards = build_cards(catalog(DashboardDomain::PrivateCredit), &results);
        assert_eq!(cards[0].headline, "$0");
        assert_eq!(cards[0].summary.current_value, 0.0);
        assert_eq!(cards[0].delta, None);
    }

    #[test]
    fn snapshot_card_has_no_badge_or_chart() {
        let results = results_for(DashboardDomain::Commodities, &[("holders", "total\n\n15321\n")]);
        let cards = build_cards(catalog(DashboardDomain::Commodities), &results);
        let holders = cards.iter().find(|c| c.metric_id() == "holders").unwrap();
        assert_eq!(holders.headline, "15.3K");
        assert_eq!(holders.delta, None);
        assert!(!holders.has_chart);
    }
}
