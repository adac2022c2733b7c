//! Top-level application orchestration.
//!
//! `src/main.rs` only maps errors to exit codes; this module parses the CLI,
//! sets up logging, builds feed descriptors, and dispatches.

use std::time::Duration;

use clap::Parser;

use crate::cli::{ChartArgs, Command, ExportArgs, FeedsArgs, FetchArgs, ShowArgs};
use crate::dashboard::{catalog, descriptors_from_env};
use crate::data::HttpFetcher;
use crate::domain::DashboardDomain;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `dash` binary.
pub fn run() -> Result<(), AppError> {
    crate::logging::init_tracing();

    // `dash` and `dash -d commodities` behave like `dash show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Chart(args) => handle_chart(args),
        Command::Feeds(args) => handle_feeds(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let run = fetch_dashboard(&args.fetch)?;

    println!(
        "{}",
        crate::report::format_dashboard(run.domain, &run.cards, &run.results)
    );

    if args.no_chart {
        return Ok(());
    }

    let metric = match args.metric.as_deref() {
        Some(m) => m,
        None => match crate::chart::default_metric(run.domain) {
            Some(m) => m,
            None => return Ok(()),
        },
    };
    let (spec, series) = run.chart(metric)?;
    println!("{}", crate::report::format_chart(&spec, series));

    Ok(())
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let spec = pipeline::chart_for(args.domain, &args.metric)?;

    if args.json {
        let json = serde_json::to_string_pretty(&spec)
            .map_err(|e| AppError::new(4, format!("Failed to serialize chart spec: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_chart_spec(&spec));
    }
    Ok(())
}

fn handle_feeds(args: FeedsArgs) -> Result<(), AppError> {
    let domains: Vec<DashboardDomain> = match args.domain {
        Some(d) => vec![d],
        None => DashboardDomain::ALL.to_vec(),
    };

    for domain in domains {
        let descriptors = descriptors_from_env(domain, &[])?;
        println!("{}", crate::report::format_feed_listing(catalog(domain), &descriptors));
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let run = fetch_dashboard(&args.fetch)?;

    for (id, reason) in run.results.failures() {
        tracing::warn!(feed = id, reason, "exporting with a failed feed");
    }

    match &args.csv {
        Some(feed_id) => crate::io::write_series_csv(&args.out, &run, feed_id)?,
        None => crate::io::write_snapshot_json(&args.out, &run)?,
    }
    eprintln!("Wrote {}", args.out.display());
    Ok(())
}

fn fetch_dashboard(args: &FetchArgs) -> Result<pipeline::DashboardRun, AppError> {
    let descriptors = descriptors_from_env(args.domain, &args.feeds)?;
    let fetcher = HttpFetcher::new(args.timeout.map(Duration::from_secs))
        .map_err(|e| AppError::usage(format!("Failed to set up HTTP client: {e}")))?;
    Ok(pipeline::run_dashboard(args.domain, &fetcher, descriptors))
}

/// Rewrite argv so `dash` defaults to `dash show`.
///
/// Rules:
/// - `dash`                       -> `dash show`
/// - `dash -d commodities ...`    -> `dash show -d commodities ...`
/// - `dash --help/--version/-h`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
    }
    argv
}
