//! Feed URL configuration.
//!
//! URLs come from the environment (optionally seeded from `.env`), one
//! variable per feed, and can be overridden per run with `--feed id=url`.

use std::str::FromStr;

use crate::dashboard::catalog::catalog;
use crate::domain::{DashboardDomain, FeedDescriptor};
use crate::error::AppError;

/// A `--feed <id>=<url>` override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOverride {
    pub feed_id: String,
    pub url: String,
}

impl FromStr for FeedOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, url) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <feed-id>=<url>, got '{s}'"))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing feed id in '{s}'"));
        }
        Ok(Self {
            feed_id: id.to_string(),
            url: url.trim().to_string(),
        })
    }
}

/// Build descriptors for `domain` from the process environment.
pub fn descriptors_from_env(domain: DashboardDomain, overrides: &[FeedOverride]) -> Result<Vec<FeedDescriptor>, AppError> {
    // A missing .env is the normal case.
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        _ => {}
    }
    descriptors(domain, |key| std::env::var(key).ok(), overrides)
}

/// Build descriptors for `domain`, reading URLs through `lookup`.
///
/// Unset or blank values leave the URL absent. Overrides win over the
/// environment; an override naming a feed the domain lacks is a usage error.
pub fn descriptors(
    domain: DashboardDomain,
    lookup: impl Fn(&str) -> Option<String>,
    overrides: &[FeedOverride],
) -> Result<Vec<FeedDescriptor>, AppError> {
    let cat = catalog(domain);

    for o in overrides {
        if cat.feed(&o.feed_id).is_none() {
            let known: Vec<_> = cat.feeds.iter().map(|f| f.id).collect();
            return Err(AppError::usage(format!(
                "unknown feed '{}' for {domain} (known: {})",
                o.feed_id,
                known.join(", ")
            )));
        }
    }

    Ok(cat
        .feeds
        .iter()
        .map(|feed| {
            let from_override = overrides.iter().rev().find(|o| o.feed_id == feed.id).map(|o| o.url.clone());
            let url = from_override.or_else(|| lookup(feed.env_var)).and_then(non_blank);
            FeedDescriptor::new(feed.id, url, feed.schema)
        })
        .collect())
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
