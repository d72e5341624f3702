//! Document-level output records.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document metadata read from the PDF information dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    #[serde(rename = "creationDate")]
    pub creation_date: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(rename = "modDate")]
    pub mod_date: Option<DateTime<Utc>>,

    /// Total number of pages
    pub num_pages: u32,
}

/// A contiguous run of blocks between two heading boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier
    pub section_id: Uuid,

    /// Heading text, or a fallback (`"Untitled"`, `"Introduction"`,
    /// `"Page {n}"`) when no heading was detected
    pub heading: String,

    /// Body text, block texts joined by blank lines
    pub text: String,

    /// First page contributing to the section (1-indexed)
    pub start_page: u32,

    /// Last page contributing to the section (1-indexed)
    pub end_page: u32,
}

/// Metadata for one extracted table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecord {
    /// Unique table identifier
    pub table_id: Uuid,

    /// Page the table was found on (1-indexed)
    pub page: u32,

    /// Path of the persisted CSV file
    pub storage_path: PathBuf,

    /// Number of rows in the cell matrix
    pub rows: usize,

    /// Width of the first row (0 for an empty matrix)
    pub cols: usize,

    /// Raw cell matrix, embedded when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_cells: Option<Vec<Vec<String>>>,
}

/// Metadata for one extracted image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique image identifier
    pub image_id: Uuid,

    /// Page the image was found on (1-indexed)
    pub page: u32,

    /// Path of the persisted image file
    pub storage_path: PathBuf,

    /// Image format / file extension as reported by the backend
    pub format: String,

    /// Width in pixels, if reported
    pub width: Option<u32>,

    /// Height in pixels, if reported
    pub height: Option<u32>,
}

/// The structured record produced for one source document.
///
/// Immutable once serialized; downstream consumers (indexing, retrieval)
/// read the JSON form and never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Unique document identifier
    pub doc_id: Uuid,

    /// Source file name
    pub filename: String,

    /// Resolved title: metadata title, else first section heading,
    /// else the filename stem
    pub title: String,

    /// Document metadata
    pub metadata: DocMetadata,

    /// Sections in reading order
    pub sections: Vec<Section>,

    /// Extracted tables
    pub tables: Vec<TableRecord>,

    /// Extracted images
    pub figures: Vec<ImageRecord>,

    /// Text following the references/bibliography marker, empty if none
    pub references: String,

    /// Concatenation of every surviving block, blank-line separated
    pub raw_text: String,

    /// Whether the document looks scanned (native text layer absent)
    pub needs_ocr: bool,
}

impl ProcessedDocument {
    /// Number of detected sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check whether any structure beyond raw text was recovered.
    pub fn has_structure(&self) -> bool {
        !self.sections.is_empty() || !self.tables.is_empty() || !self.figures.is_empty()
    }
}

/// One manifest line for a successfully processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Document identifier, matching the document JSON
    pub doc_id: Uuid,

    /// Source file name
    pub filename: String,

    /// Path of the written document JSON
    pub json_path: PathBuf,
}
