//! Asset extraction: tables and images persisted next to the document JSON.

mod images;
mod tables;

pub use images::{extract_images, ImageExtraction};
pub use tables::{extract_tables, TableExtraction};

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Typed result of one per-page collaborator call.
///
/// A malformed page is data, not control flow: it becomes `Skipped` with a
/// reason, the caller aggregates and logs, and processing continues.
#[derive(Debug, Clone)]
pub enum PageOutcome<T> {
    /// The page yielded content (possibly none).
    Extracted(T),
    /// Extraction failed on this page; treated as empty.
    Skipped {
        /// Why the page was skipped
        reason: String,
    },
}

/// A page whose extraction was skipped, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedPage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Why extraction was skipped
    pub reason: String,
}

/// Write bytes to `path` atomically: temp file in the same directory, then
/// rename. A failed write never leaves a partial file behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "output path has no parent directory",
        ))
    })?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
