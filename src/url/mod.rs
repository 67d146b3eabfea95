//! URL handling for pagesift
//!
//! This module turns the raw strings of the input list into well-formed
//! absolute URLs that the fetcher can work with.

mod normalize;

pub use normalize::normalize_url;
