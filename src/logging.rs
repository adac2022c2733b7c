//! Tracing setup for the `dash` binary.
//!
//! Logs go to stderr; stdout carries the report.

pub const LOG_FORMAT_VAR: &str = "DASHBOARD_LOG_FORMAT";

pub fn logs_are_json() -> bool {
    matches!(std::env::var(LOG_FORMAT_VAR).as_deref(), Ok("json"))
}

/// Initialize tracing from `RUST_LOG` (default `warn`) and `DASHBOARD_LOG_FORMAT`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    if logs_are_json() {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
