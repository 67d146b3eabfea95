//! Search coordinator - top-level run orchestration
//!
//! Validates the inputs, compiles the matcher, seeds the queue, runs the
//! worker pool to completion, and returns the aggregated report.

use crate::config::{validate_request, SearchConfig};
use crate::searcher::fetcher::build_http_client;
use crate::searcher::matcher::TermMatcher;
use crate::searcher::pool::{run_pool, CancelToken};
use crate::{SearchError, SiteError};

/// The aggregate outcome of one search run
#[derive(Debug, Default)]
pub struct SearchReport {
    /// Normalized URLs whose body matched the term, in discovery order
    pub matched: Vec<String>,

    /// One record per URL that failed to normalize or fetch; a fetched
    /// but unmatched URL appears in neither list
    pub errors: Vec<SiteError>,
}

/// Top-level orchestration for search runs
///
/// All queue and result state lives inside a single [`perform`] call;
/// nothing is shared between runs.
///
/// [`perform`]: Searcher::perform
pub struct Searcher {
    config: SearchConfig,
    cancel: CancelToken,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// A handle that stops this searcher's runs from picking up new URLs
    /// once raised
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Fetches every URL in the list and reports the ones whose body
    /// matches `term`
    ///
    /// Fails fast with a [`ConfigError`] before any fetching if the list
    /// or the term is empty, or if the term does not compile. Blocks until
    /// every worker has joined.
    ///
    /// [`ConfigError`]: crate::ConfigError
    pub async fn perform(&self, urls: &[String], term: &str) -> Result<SearchReport, SearchError> {
        self.config.validate()?;
        validate_request(urls, term)?;
        let matcher = TermMatcher::compile(term)?;
        let client = build_http_client(&self.config)?;

        tracing::info!("Searching {} URLs for {:?}", urls.len(), matcher.term());
        let started = std::time::Instant::now();

        let outcome = run_pool(
            client,
            matcher,
            urls,
            self.config.redirect_limit,
            self.config.max_workers,
            self.cancel.clone(),
        )
        .await;

        tracing::info!(
            "Search finished in {:.2?}: {} matched, {} failed",
            started.elapsed(),
            outcome.matched.len(),
            outcome.errors.len()
        );

        Ok(SearchReport {
            matched: outcome.matched,
            errors: outcome.errors,
        })
    }
}

/// Runs a complete search with a fresh [`Searcher`]
pub async fn search(
    urls: &[String],
    term: &str,
    config: SearchConfig,
) -> Result<SearchReport, SearchError> {
    Searcher::new(config).perform(urls, term).await
}
