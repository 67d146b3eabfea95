use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// A search term compiled into a case-insensitive pattern
///
/// The term is treated as a regular expression, so `foo|bar` matches
/// either word; a plain word behaves like a substring test. Compilation
/// happens once per run and the matcher is cheap to clone into workers.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    pattern: Regex,
}

impl TermMatcher {
    /// Compiles a search term; an unparseable pattern is a configuration
    /// error and aborts the run before any fetching starts
    pub fn compile(term: &str) -> Result<Self, ConfigError> {
        let pattern = RegexBuilder::new(term).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    /// Returns true iff the pattern occurs anywhere in the body
    pub fn is_match(&self, body: &str) -> bool {
        self.pattern.is_match(body)
    }

    /// The source pattern this matcher was compiled from
    pub fn term(&self) -> &str {
        self.pattern.as_str()
    }
}
