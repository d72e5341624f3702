//! Data model for normalized pages and processed-document output.

mod block;
mod document;

pub use block::{Block, Page, Rect};
pub use document::{
    DocMetadata, ImageRecord, ManifestEntry, ProcessedDocument, Section, TableRecord,
};
