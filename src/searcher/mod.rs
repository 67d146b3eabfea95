//! The concurrent fetch-and-match engine
//!
//! This module contains the core search logic, including:
//! - HTTP fetching with manual redirect handling and the www-retry
//! - Body matching against the compiled search pattern
//! - The bounded worker pool draining the shared work queue
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod matcher;
mod pool;

pub use coordinator::{search, SearchReport, Searcher};
pub use fetcher::{build_http_client, fetch_page};
pub use matcher::TermMatcher;
pub use pool::CancelToken;
