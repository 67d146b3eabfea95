//! Search run configuration
//!
//! Everything here comes from CLI flags (or the defaults below); there is
//! no configuration file.

use crate::ConfigError;
use std::time::Duration;

/// Tuning knobs for one search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of concurrent workers; the effective worker count is
    /// capped by the number of pending URLs
    pub max_workers: usize,

    /// Maximum number of redirect hops followed for a single URL
    pub redirect_limit: u32,

    /// Overall timeout for a single HTTP request
    pub request_timeout: Duration,

    /// Timeout for establishing a connection
    pub connect_timeout: Duration,

    /// User agent header sent with every request
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_workers: 20,
            redirect_limit: 10,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchConfig {
    /// Validates the configuration itself, independent of any request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

/// Validates the per-run inputs before any worker is spawned
///
/// An empty URL list or an empty search term is a fatal configuration
/// error: no partial run occurs.
pub fn validate_request(urls: &[String], term: &str) -> Result<(), ConfigError> {
    if term.is_empty() {
        return Err(ConfigError::EmptyTerm);
    }
    if urls.is_empty() {
        return Err(ConfigError::EmptyUrlList);
    }
    Ok(())
}
