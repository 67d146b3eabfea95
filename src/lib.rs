//! Pagesift: a concurrent website searcher
//!
//! This crate fetches a list of URLs concurrently, tests each page body
//! against a case-insensitive search pattern, and collects the URLs that
//! matched along with an error record for every URL that could not be
//! fetched.

pub mod config;
pub mod input;
pub mod output;
pub mod searcher;
pub mod url;

use thiserror::Error;

/// Main error type for pagesift operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed URL list: {0}")]
    UrlList(#[from] csv::Error),
}

/// Configuration-specific errors
///
/// All of these are fatal and surface before any concurrent work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Search term must not be empty")]
    EmptyTerm,

    #[error("URL list must not be empty")]
    EmptyUrlList,

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Worker count must be at least 1")]
    NoWorkers,
}

/// Terminal failure for a single site task
///
/// Recorded in the error log of a run; a site failure never aborts the
/// run or the other tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteFailure {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP redirect too deep")]
    RedirectLoop,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// One entry of the error log: the URL a task was processing and the
/// failure that ended it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{url}: {failure}")]
pub struct SiteError {
    pub url: String,
    pub failure: SiteFailure,
}

/// Result type alias for pagesift operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for a single site task
pub type SiteResult<T> = std::result::Result<T, SiteFailure>;

// Re-export commonly used types
pub use config::SearchConfig;
pub use searcher::{search, CancelToken, SearchReport, Searcher, TermMatcher};
pub use self::url::normalize_url;
