//! Matched-URL output
//!
//! Writes the result list as plain text, one URL per line, in the order
//! the run discovered them. The writer neither sorts nor deduplicates.

use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the matched URLs to `path`
pub fn write_matches(path: &Path, urls: &[String]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()?;
    Ok(())
}
