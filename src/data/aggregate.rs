//! Concurrent, failure-isolated ingestion of a set of feeds.
//!
//! `ingest` is a fan-out/fan-in barrier: every feed is fetched and parsed on
//! its own worker, and the call returns only once all of them have settled.
//! A failing feed produces `FeedResult::Failure` for its id and nothing else.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{error, info, info_span, warn};

use crate::data::fetch::TabularFetcher;
use crate::domain::{FeedDescriptor, FeedResult, TimeSeries};
use crate::io::ingest::parse_with_stats;

/// Outcome of one ingestion pass, keyed by feed id.
///
/// Re-ingestion replaces the whole value; results are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedResults {
    results: HashMap<String, FeedResult>,
}

impl FeedResults {
    pub fn get(&self, feed_id: &str) -> Option<&FeedResult> {
        self.results.get(feed_id)
    }

    /// Series for `feed_id`; failed or unknown feeds read as empty.
    pub fn series(&self, feed_id: &str) -> &TimeSeries {
        static EMPTY: TimeSeries = TimeSeries::EMPTY;
        self.get(feed_id).and_then(FeedResult::series).unwrap_or(&EMPTY)
    }

    /// Failed feeds as `(id, reason)`, sorted by id.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .results
            .iter()
            .filter_map(|(id, r)| r.failure_reason().map(|reason| (id.as_str(), reason)))
            .collect();
        out.sort_unstable();
        out
    }

    pub fn has_failures(&self) -> bool {
        self.results.values().any(|r| !r.is_success())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeedResult)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FeedResult)> for FeedResults {
    fn from_iter<I: IntoIterator<Item = (String, FeedResult)>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// Fetch and parse every descriptor concurrently and wait for all of them.
///
/// Descriptors without a URL settle immediately as an empty success, with no
/// fetch attempt. If two descriptors share an id, the later one wins.
pub fn ingest(fetcher: &dyn TabularFetcher, descriptors: &[FeedDescriptor]) -> FeedResults {
    let started = Instant::now();

    // One worker per feed so that slow feeds never queue behind each other.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(descriptors.len().max(1))
        .thread_name(|i| format!("feed-{i}"))
        .build();

    let settled: Vec<(String, FeedResult)> = match pool {
        Ok(pool) => pool.install(|| fan_out(fetcher, descriptors)),
        Err(e) => {
            warn!(error = %e, "could not build feed pool, using the global pool");
            fan_out(fetcher, descriptors)
        }
    };

    let results: FeedResults = settled.into_iter().collect();
    let failed = results.failures().len();
    info!(
        feeds = results.len(),
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingestion settled"
    );
    results
}

fn fan_out(fetcher: &dyn TabularFetcher, descriptors: &[FeedDescriptor]) -> Vec<(String, FeedResult)> {
    descriptors
        .par_iter()
        .map(|d| (d.id.clone(), ingest_one(fetcher, d)))
        .collect()
}

fn ingest_one(fetcher: &dyn TabularFetcher, descriptor: &FeedDescriptor) -> FeedResult {
    let _span = info_span!("feed", id = %descriptor.id).entered();

    // A panicking fetcher or parser fails its own feed, never the barrier.
    match panic::catch_unwind(AssertUnwindSafe(|| settle(fetcher, descriptor))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = format!("feed '{}' panicked: {}", descriptor.id, panic_message(&*payload));
            error!(%reason, "feed worker panicked");
            FeedResult::Failure(reason)
        }
    }
}

fn settle(fetcher: &dyn TabularFetcher, descriptor: &FeedDescriptor) -> FeedResult {
    let Some(url) = descriptor.url.as_deref() else {
        info!("no source configured, treating as empty");
        return FeedResult::Success(TimeSeries::empty());
    };

    match fetcher.fetch(url) {
        Ok(body) => {
            let (series, stats) = parse_with_stats(&body, &descriptor.schema);
            info!(
                schema = descriptor.schema.id,
                rows = stats.rows_used(),
                dropped = stats.rows_dropped,
                "feed loaded"
            );
            FeedResult::Success(series)
        }
        Err(e) => {
            warn!(error = %e, "feed failed");
            FeedResult::Failure(e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
