//! URL-list input
//!
//! The search engine itself only consumes a sequence of raw URL strings;
//! this module produces that sequence from a file. A CSV file with a
//! `URL` header column yields that column of every record; anything else
//! is treated as a plain list with one URL per line. Order is preserved
//! and duplicates are kept.

use crate::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct UrlRecord {
    #[serde(rename = "URL", alias = "url", alias = "Url")]
    url: String,
}

/// Reads the list of raw URLs to search from `path`
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let has_url_column = reader
        .headers()?
        .iter()
        .any(|header| matches!(header, "URL" | "url" | "Url"));

    if has_url_column {
        let mut urls = Vec::new();
        for record in reader.deserialize() {
            let record: UrlRecord = record?;
            if !record.url.is_empty() {
                urls.push(record.url);
            }
        }
        return Ok(urls);
    }

    // No URL header: treat the file as a plain list, one URL per line
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
