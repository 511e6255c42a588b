//! Site-Tally main entry point
//!
//! This is the command-line interface for the Site-Tally same-host crawler.

use anyhow::Context;
use clap::Parser;
use site_tally::config::{load_http_config, validate, Config, HttpConfig};
use site_tally::crawler::crawl;
use site_tally::output::{print_failures, print_report, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Tally: count how often each page of a site is linked
///
/// Site-Tally crawls every page reachable from the seed URL on the same host,
/// with a bounded number of concurrent fetches and a cap on distinct pages,
/// then prints how many times each page was encountered.
#[derive(Parser, Debug)]
#[command(name = "site-tally")]
#[command(version)]
#[command(about = "A concurrent same-host link tally", long_about = None)]
struct Cli {
    /// URL the crawl starts from; also defines the crawl scope
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Maximum number of pages processed at once
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: usize,

    /// Maximum number of distinct pages to register
    #[arg(value_name = "MAX_PAGES")]
    max_pages: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to a TOML file with an [http] table
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print crawl statistics after the report
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let http = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_http_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => HttpConfig::default(),
    };

    let mut config = Config::new(cli.seed_url.clone(), cli.max_concurrency, cli.max_pages);
    config.http = http;
    validate(&config).context("invalid arguments")?;

    println!("starting crawl of: {}", config.crawl.base_url);

    let summary = crawl(config).await.context("crawl could not start")?;

    print_report(&summary);
    if cli.stats {
        println!();
        print_statistics(&summary.stats);
    }
    if cli.verbose > 0 {
        print_failures(&summary.stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_tally=info,warn"),
            1 => EnvFilter::new("site_tally=debug,info"),
            2 => EnvFilter::new("site_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
