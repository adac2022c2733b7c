//! Feed retrieval and concurrent ingestion.

pub mod aggregate;
pub mod fetch;

pub use aggregate::{FeedResults, ingest};
pub use fetch::{HttpFetcher, TabularFetcher};
