use crate::SiteFailure;
use url::Url;

/// Normalizes a raw input string into an absolute URL
///
/// # Normalization Steps
///
/// 1. If the string carries no scheme separator, assume `http`: a
///    schemeless string like `example.com/page` is read as host plus path
/// 2. Parse the result; reject anything unparseable
/// 3. Reject URLs that still have no host after parsing
///
/// Re-parsing through [`Url`] means downstream consumers always see a
/// consistent absolute shape: a bare host gains the `/` path, the host is
/// lowercased, and the path keeps its case.
///
/// # Examples
///
/// ```
/// use pagesift::url::normalize_url;
///
/// let url = normalize_url("example.com/page").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
///
/// let url = normalize_url("https://example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, SiteFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SiteFailure::InvalidUrl(raw.to_string()));
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url =
        Url::parse(&candidate).map_err(|_| SiteFailure::InvalidUrl(trimmed.to_string()))?;

    if !url.has_host() {
        return Err(SiteFailure::InvalidUrl(trimmed.to_string()));
    }

    Ok(url)
}

/// True iff the string starts with an explicit scheme like `http://`
///
/// A `://` later in the string (say, inside a query value) does not count.
fn has_scheme(s: &str) -> bool {
    match s.find("://") {
        Some(idx) => {
            let prefix = &s[..idx];
            let mut chars = prefix.chars();
            chars
                .next()
                .map_or(false, |c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        None => false,
    }
}
