//! Page-level types: normalized text blocks with aggregated font statistics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates (points).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A contiguous text fragment on a page — the atomic unit of segmentation.
///
/// Built by merging all spans of one layout group. `text` is trimmed and
/// never empty; groups that reduce to whitespace are dropped during
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Concatenated span text (trimmed, non-empty)
    pub text: String,

    /// Bounding box of the originating layout group
    pub bbox: Rect,

    /// Every span font size observed in the group
    pub font_sizes: Vec<f32>,

    /// Largest span font size, absent when no span carried size information
    pub max_font_size: Option<f32>,

    /// Mean span font size, absent when no span carried size information
    pub avg_font_size: Option<f32>,

    /// Distinct font names observed in the group
    pub fonts: BTreeSet<String>,
}

/// One page of normalized blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Normalized blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Plain text of the page: block texts joined by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
