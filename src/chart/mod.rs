//! Chart configuration: (domain, metric) -> `ChartSeriesSpec`.
//!
//! The per-domain tables hold the policy data; the resolver only looks
//! entries up and applies the stacking rule.

pub mod resolver;
pub mod tables;

pub use resolver::{charted_metrics, default_metric, lookup, resolve};
