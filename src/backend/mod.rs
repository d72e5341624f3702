//! Layout backend abstraction.
//!
//! The structure engine never reads PDF bytes itself. Everything it needs —
//! span groups with font metadata, table cell matrices, embedded images,
//! per-page plain text — comes through the [`LayoutBackend`] trait, so any
//! concrete layout library can sit underneath. [`LopdfBackend`] is the
//! bundled implementation.

mod lopdf_backend;
mod table_grid;

pub use lopdf_backend::LopdfBackend;
pub use table_grid::GridConfig;

use crate::error::Result;
use crate::model::{DocMetadata, Rect};

/// A table as a matrix of cell strings, row-major.
pub type TableMatrix = Vec<Vec<String>>;

/// What a layout group contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Text spans
    Text,
    /// A raster image
    Image,
    /// Vector art or other non-text content
    Drawing,
}

/// A text fragment with font metadata, as emitted by the layout backend.
#[derive(Debug, Clone)]
pub struct RawSpan {
    /// The span text
    pub text: String,
    /// Font size in points, if the backend reports one
    pub font_size: Option<f32>,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
}

/// One layout primitive on a page: a group of spans sharing a bounding box.
#[derive(Debug, Clone)]
pub struct SpanGroup {
    /// Group content kind; only [`GroupKind::Text`] groups carry spans
    pub kind: GroupKind,
    /// Bounding box of the group in page coordinates
    pub bbox: Rect,
    /// Spans in reading order
    pub spans: Vec<RawSpan>,
}

/// An embedded raster image with its raw payload.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    /// Raw image bytes, written out verbatim
    pub data: Vec<u8>,
    /// File extension for the payload (e.g., "jpg", "png", "raw")
    pub format: String,
    /// Width in pixels, if reported
    pub width: Option<u32>,
    /// Height in pixels, if reported
    pub height: Option<u32>,
}

/// Abstract interface for per-page layout access.
///
/// Page numbers are 1-indexed throughout. Implementations should return
/// [`crate::Error::PageOutOfRange`] for page numbers past the document end.
pub trait LayoutBackend {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Document metadata (title, author, dates, page count).
    fn metadata(&self) -> DocMetadata;

    /// Layout groups for a page, in reading order.
    fn page_spans(&self, page: u32) -> Result<Vec<SpanGroup>>;

    /// Detected tables on a page as cell matrices.
    fn page_tables(&self, page: u32) -> Result<Vec<TableMatrix>>;

    /// Embedded raster images on a page.
    fn page_images(&self, page: u32) -> Result<Vec<ExtractedImage>>;

    /// Plain text of a page, independent of the span pipeline.
    fn page_plain_text(&self, page: u32) -> Result<String>;
}
