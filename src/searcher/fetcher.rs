//! HTTP fetcher implementation
//!
//! This module resolves one normalized URL to a page body or a terminal
//! failure, including:
//! - Building the HTTP client with timeouts and a manual redirect policy
//! - Following redirects up to a bounded hop count
//! - The one-shot `www.` retry after a first-attempt connection failure
//! - Error classification

use crate::config::SearchConfig;
use crate::{SiteFailure, SiteResult};
use reqwest::{header, redirect::Policy, Client};
use url::Url;

/// Builds the HTTP client shared by all workers
///
/// Redirects are handled manually in [`fetch_page`], so the client itself
/// never follows them.
pub fn build_http_client(config: &SearchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, following redirects, and returns the response body
///
/// # Request Flow
///
/// 1. GET the current URL
/// 2. 2xx: return the body
/// 3. 3xx: resolve the `Location` target against the current URL and hop
///    to it, up to `redirect_limit` hops; exhaustion is a
///    [`SiteFailure::RedirectLoop`]
/// 4. Connection-level failure (DNS, connect, timeout) on the very first
///    attempt: retry once with `www.` prepended to the host, spending one
///    hop; any later connection failure is terminal
/// 5. Anything else (unexpected status class, body decode failure) fails
///    immediately with [`SiteFailure::Fetch`]
///
/// Exactly one terminal outcome per call; the retry fires at most once per
/// task and only before any redirect has been followed.
pub async fn fetch_page(client: &Client, url: &Url, redirect_limit: u32) -> SiteResult<String> {
    let mut current = url.clone();
    let mut remaining = redirect_limit;
    let mut first_attempt = true;

    loop {
        match client.get(current.clone()).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response
                        .text()
                        .await
                        .map_err(|e| SiteFailure::Fetch(e.to_string()));
                }

                if status.is_redirection() {
                    first_attempt = false;
                    let location = response
                        .headers()
                        .get(header::LOCATION)
                        .and_then(|value| value.to_str().ok())
                        .ok_or_else(|| {
                            SiteFailure::Fetch(format!(
                                "HTTP {} without a Location header",
                                status.as_u16()
                            ))
                        })?;

                    if remaining == 0 {
                        return Err(SiteFailure::RedirectLoop);
                    }

                    let next = resolve_redirect(&current, location)?;
                    tracing::debug!("Redirect {} -> {}", current, next);
                    current = next;
                    remaining -= 1;
                    continue;
                }

                return Err(SiteFailure::Fetch(format!("HTTP {}", status.as_u16())));
            }

            Err(e) if is_connection_error(&e) => {
                if first_attempt && remaining > 0 {
                    if let Some(retry) = www_variant(&current) {
                        tracing::debug!("Connection failed for {}, retrying as {}", current, retry);
                        first_attempt = false;
                        remaining -= 1;
                        current = retry;
                        continue;
                    }
                }
                return Err(SiteFailure::Connection(e.to_string()));
            }

            Err(e) => return Err(SiteFailure::Fetch(e.to_string())),
        }
    }
}

/// Resolves a `Location` header value against the URL that produced it
///
/// An absolute target fully replaces the current URL; a protocol-relative
/// `//host/path` target inherits only the scheme; anything else inherits
/// scheme and host (port included) from the current URL, with the path
/// prefixed by `/` if it does not already start with one.
pub(crate) fn resolve_redirect(current: &Url, location: &str) -> SiteResult<Url> {
    if let Some(rest) = location.strip_prefix("//") {
        let target = format!("{}://{}", current.scheme(), rest);
        return Url::parse(&target).map_err(|e| bad_location(location, e));
    }

    match Url::parse(location) {
        Ok(next) => Ok(next),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = if location.starts_with('/') {
                location.to_string()
            } else {
                format!("/{}", location)
            };
            let target = format!("{}{}", current.origin().ascii_serialization(), path);
            Url::parse(&target).map_err(|e| bad_location(location, e))
        }
        Err(e) => Err(bad_location(location, e)),
    }
}

fn bad_location(location: &str, err: url::ParseError) -> SiteFailure {
    SiteFailure::Fetch(format!("Invalid redirect target {:?}: {}", location, err))
}

/// The same URL with `www.` prepended to its host
///
/// IP-address hosts have no `www.` form and yield `None`.
fn www_variant(url: &Url) -> Option<Url> {
    let host = url.host_str()?;
    let mut retry = url.clone();
    retry.set_host(Some(&format!("www.{}", host))).ok()?;
    Some(retry)
}

fn is_connection_error(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}
