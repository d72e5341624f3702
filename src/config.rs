//! Ingestion configuration.
//!
//! Every heuristic threshold the engine uses is a named field here with a
//! documented default, so per-corpus tuning never means editing constants.

/// Configuration for document structure extraction.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Maximum trimmed length (chars) for a block to count as a potential
    /// header/footer line. Longer blocks are body text.
    pub short_text_cutoff: usize,

    /// Fraction of pages a short line must appear on to be treated as a
    /// repeated header/footer (minimum 2 pages regardless).
    pub repeat_ratio: f64,

    /// Percentile of the max-font-size distribution used as the heading
    /// threshold.
    pub heading_percentile: f64,

    /// A sampled page with fewer trimmed characters than this counts as
    /// effectively textless for the OCR heuristic.
    pub ocr_min_chars: usize,

    /// Number of leading pages the OCR heuristic samples.
    pub ocr_sample_pages: u32,

    /// Whether the batch driver processes files in parallel.
    pub parallel: bool,

    /// Whether raw table cells are embedded inline in the output JSON.
    /// Large tables inflate output size considerably.
    pub embed_table_cells: bool,
}

impl IngestConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short-text cutoff for repetition detection.
    pub fn with_short_text_cutoff(mut self, chars: usize) -> Self {
        self.short_text_cutoff = chars;
        self
    }

    /// Set the repeated-line page ratio.
    pub fn with_repeat_ratio(mut self, ratio: f64) -> Self {
        self.repeat_ratio = ratio;
        self
    }

    /// Set the heading font-size percentile.
    pub fn with_heading_percentile(mut self, percentile: f64) -> Self {
        self.heading_percentile = percentile;
        self
    }

    /// Set the minimum character count for a page to count as having text.
    pub fn with_ocr_min_chars(mut self, chars: usize) -> Self {
        self.ocr_min_chars = chars;
        self
    }

    /// Set how many leading pages the OCR heuristic samples.
    pub fn with_ocr_sample_pages(mut self, pages: u32) -> Self {
        self.ocr_sample_pages = pages;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable inline raw table cells.
    pub fn with_embed_table_cells(mut self, embed: bool) -> Self {
        self.embed_table_cells = embed;
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            short_text_cutoff: 120,
            repeat_ratio: 0.3,
            heading_percentile: 90.0,
            ocr_min_chars: 50,
            ocr_sample_pages: 3,
            parallel: true,
            embed_table_cells: true,
        }
    }
}
