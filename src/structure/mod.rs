//! Document structure heuristics.
//!
//! The engine that turns normalized layout into logical structure:
//! block normalization, header/footer repetition removal, font-percentile
//! section segmentation, reference location, and the scanned-document check.
//! Everything here operates on [`crate::model::Page`] values and a
//! [`crate::backend::LayoutBackend`]; no PDF library types appear.

mod normalize;
mod references;
mod repeats;
mod scanned;
mod sections;

pub use normalize::{normalize_document, normalize_page};
pub use references::locate_references;
pub use repeats::{detect_repeated_lines, remove_repeated_lines};
pub use scanned::needs_ocr;
pub use sections::segment_sections;
