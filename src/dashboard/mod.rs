//! Per-domain dashboard definitions and their runtime configuration.

pub mod catalog;
pub mod config;

pub use catalog::{DomainCatalog, FeedSpec, KpiDefinition, catalog};
pub use config::{FeedOverride, descriptors, descriptors_from_env};
