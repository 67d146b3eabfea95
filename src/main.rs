//! Pagesift main entry point
//!
//! Command-line interface: read the URL list, run the concurrent search,
//! persist the matched URLs, report the failures.

use anyhow::Context;
use clap::Parser;
use pagesift::config::SearchConfig;
use pagesift::searcher::Searcher;
use pagesift::{input, output};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Pagesift: a concurrent website searcher
///
/// Fetches every URL in the input list, tests each page body against the
/// search term (case-insensitive), writes the matching URLs to the output
/// file, and reports the URLs that could not be fetched.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "Search a list of websites for a term", long_about = None)]
struct Cli {
    /// The term to search page bodies for (case-insensitive pattern)
    #[arg(value_name = "TERM")]
    term: String,

    /// URL list: CSV with a URL column, or one URL per line
    #[arg(short, long, default_value = "urls.txt")]
    input: PathBuf,

    /// File the matched URLs are written to
    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    /// Maximum number of concurrent fetches
    #[arg(long, default_value_t = 20)]
    workers: usize,

    /// Maximum redirect hops per URL
    #[arg(long, default_value_t = 10)]
    redirect_limit: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = SearchConfig {
        max_workers: cli.workers,
        redirect_limit: cli.redirect_limit,
        request_timeout: Duration::from_secs(cli.timeout),
        ..SearchConfig::default()
    };

    tracing::info!("Reading URL list from: {}", cli.input.display());
    let urls = input::read_urls(&cli.input)
        .with_context(|| format!("failed to read URL list from {}", cli.input.display()))?;

    let searcher = Searcher::new(config);
    let report = searcher.perform(&urls, &cli.term).await?;

    for error in &report.errors {
        tracing::warn!("{}", error);
    }

    if report.matched.is_empty() {
        println!("No matches for {:?} across {} URLs", cli.term, urls.len());
    } else {
        match output::write_matches(&cli.output, &report.matched) {
            Ok(()) => println!(
                "{} of {} URLs matched {:?}; written to {}",
                report.matched.len(),
                urls.len(),
                cli.term,
                cli.output.display()
            ),
            Err(e) => {
                tracing::error!("Unable to save results: {}", e);
                for url in &report.matched {
                    println!("{}", url);
                }
            }
        }
    }

    if !report.errors.is_empty() {
        println!(
            "{} URLs could not be fetched (see warnings above)",
            report.errors.len()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
