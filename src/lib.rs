//! # pdfstruct
//!
//! PDF logical-structure extraction for Rust.
//!
//! This library reconstructs the logical structure of PDF documents —
//! sections, headings, tables, figures, references, and a scanned/OCR
//! flag — from low-level page-layout primitives, and writes one structured
//! JSON record per document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use pdfstruct::{process_file, IngestConfig};
//!
//! fn main() -> pdfstruct::Result<()> {
//!     let config = IngestConfig::default();
//!     let doc = process_file(Path::new("paper.pdf"), Path::new("processed"), &config)?;
//!     println!("{} sections, needs_ocr = {}", doc.section_count(), doc.needs_ocr);
//!     Ok(())
//! }
//! ```
//!
//! Batch mode processes a whole directory and writes a manifest:
//!
//! ```no_run
//! use std::path::Path;
//! use pdfstruct::{process_dir, IngestConfig};
//!
//! let entries = process_dir(
//!     Path::new("papers"),
//!     Path::new("processed"),
//!     &IngestConfig::default(),
//! ).unwrap();
//! println!("{} documents processed", entries.len());
//! ```
//!
//! ## How it works
//!
//! - **Layout backend**: a narrow trait ([`LayoutBackend`]) supplies span
//!   groups, table matrices, images, and plain text per page; the bundled
//!   [`LopdfBackend`] implements it on `lopdf`.
//! - **Structure heuristics**: repeated short lines across pages are dropped
//!   as headers/footers; a per-document font-size percentile classifies
//!   heading blocks and splits the stream into sections; a marker scan
//!   gathers reference text; leading pages are sampled to flag scanned
//!   documents.
//! - **Batch driver**: directories are processed on a rayon pool with
//!   per-file failure isolation and a single manifest written at the end.
//!
//! Every heuristic threshold is a named field on [`IngestConfig`].

pub mod backend;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod structure;

// Re-export commonly used types
pub use backend::{
    ExtractedImage, GridConfig, GroupKind, LayoutBackend, LopdfBackend, RawSpan, SpanGroup,
    TableMatrix,
};
pub use batch::{process_dir, process_dir_with_cancel, MANIFEST_FILENAME};
pub use config::IngestConfig;
pub use error::{Error, Result};
pub use extract::{PageOutcome, SkippedPage};
pub use model::{
    Block, DocMetadata, ImageRecord, ManifestEntry, Page, ProcessedDocument, Rect, Section,
    TableRecord,
};
pub use pipeline::{process_bytes, process_file, process_with_backend, sanitize_stem};
