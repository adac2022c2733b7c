//! Retrieval of raw feed text.
//!
//! One attempt per call, outcome surfaced as-is: no retries. A timeout is only
//! applied when the caller configures one.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::FeedError;

/// Boundary to the transport that serves feed bodies.
///
/// Implementations are shared across the aggregator's worker threads.
pub trait TabularFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Default fetcher: HTTP(S) via `reqwest`, plus `file://` for local sources.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FeedError::transport("<client>", e))?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str) -> Result<String, FeedError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().map_err(|e| FeedError::transport(url, e))
    }
}

impl TabularFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FeedError> {
        if let Some(path) = url.strip_prefix("file://") {
            debug!(path, "reading local feed");
            return std::fs::read_to_string(path).map_err(|e| FeedError::Read {
                path: path.to_string(),
                reason: e.to_string(),
            });
        }

        debug!(url, "fetching feed");
        self.fetch_http(url)
    }
}
