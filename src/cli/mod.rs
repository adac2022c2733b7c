//! Command-line parsing for the `dash` KPI dashboard.
//!
//! Parsing and dispatch stay apart from the pipeline so the library can be
//! driven without a terminal.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::dashboard::FeedOverride;
use crate::domain::DashboardDomain;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dash", version, about = "KPI dashboards over tabular time-series feeds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a domain's feeds, print its KPI cards and one chart.
    Show(ShowArgs),
    /// Print the resolved chart spec for a metric (no network access).
    Chart(ChartArgs),
    /// List feeds, their environment variables, and whether a URL is set.
    Feeds(FeedsArgs),
    /// Fetch a domain's feeds and write a JSON snapshot (or one feed as CSV).
    Export(ExportArgs),
}

/// Feed selection shared by every command that fetches.
#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Dashboard domain.
    #[arg(short = 'd', long, value_enum, default_value_t = DashboardDomain::Overview)]
    pub domain: DashboardDomain,

    /// Override a feed URL for this run (repeatable), e.g. `--feed volume=file:///tmp/v.csv`.
    #[arg(long = "feed", value_name = "ID=URL")]
    pub feeds: Vec<FeedOverride>,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Metric whose chart to print (default: the domain's first charted metric).
    #[arg(short = 'm', long)]
    pub metric: Option<String>,

    /// Print KPI cards only.
    #[arg(long)]
    pub no_chart: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Dashboard domain.
    #[arg(short = 'd', long, value_enum)]
    pub domain: DashboardDomain,

    /// Metric id, e.g. `market_cap`.
    #[arg(short = 'm', long)]
    pub metric: String,

    /// Emit the chart description as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FeedsArgs {
    /// Restrict the listing to one domain.
    #[arg(short = 'd', long, value_enum)]
    pub domain: Option<DashboardDomain>,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output file.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: PathBuf,

    /// Write this feed's series as CSV instead of the JSON snapshot.
    #[arg(long, value_name = "FEED_ID")]
    pub csv: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_collects_repeated_feed_overrides() {
        let cli = Cli::parse_from([
            "dash",
            "show",
            "-d",
            "private-credit",
            "--feed",
            "deposits=file:///tmp/d.csv",
            "--feed",
            "borrows=file:///tmp/b.csv",
            "--timeout",
            "5",
        ]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.fetch.domain, DashboardDomain::PrivateCredit);
        assert_eq!(args.fetch.feeds.len(), 2);
        assert_eq!(args.fetch.feeds[1].feed_id, "borrows");
        assert_eq!(args.fetch.timeout, Some(5));
        assert_eq!(args.metric, None);
    }

    #[test]
    fn malformed_override_is_rejected() {
        let res = Cli::try_parse_from(["dash", "show", "--feed", "no-equals-sign"]);
        assert!(res.is_err());
    }

    #[test]
    fn chart_requires_domain_and_metric() {
        assert!(Cli::try_parse_from(["dash", "chart", "-d", "overview"]).is_err());
        let cli = Cli::parse_from(["dash", "chart", "-d", "real-estate", "-m", "market_cap", "--json"]);
        let Command::Chart(args) = cli.command else {
            panic!("expected chart");
        };
        assert_eq!(args.domain, DashboardDomain::RealEstate);
        assert!(args.json);
    }
}
