//! `dash-kpi` library crate.
//!
//! The binary (`dash`) is a thin wrapper around this library so that:
//!
//! - the feed pipeline is testable without spawning processes or touching the network
//! - the chart and KPI tables can be reused by other front-ends

pub mod app;
pub mod chart;
pub mod cli;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod kpi;
pub mod logging;
pub mod report;
