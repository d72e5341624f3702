//! Scanned-document detection.
//!
//! Samples the first few pages' plain text directly from the backend,
//! independent of the block pipeline. A page budget keeps this cheap; it is
//! a hint, not a guarantee.

use crate::backend::LayoutBackend;
use crate::config::IngestConfig;

/// Flag a document as needing OCR when at least half of the sampled leading
/// pages (rounded up, minimum 1) have fewer than `ocr_min_chars` characters
/// of text.
pub fn needs_ocr(backend: &dyn LayoutBackend, config: &IngestConfig) -> bool {
    let sample = config.ocr_sample_pages.min(backend.page_count());
    if sample == 0 {
        return false;
    }

    let mut empty_pages = 0u32;
    for page in 1..=sample {
        let text = match backend.page_plain_text(page) {
            Ok(text) => text,
            Err(e) => {
                // An unreadable text layer counts as an empty one
                log::debug!("plain text unavailable for page {}: {}", page, e);
                String::new()
            }
        };
        if text.trim().chars().count() < config.ocr_min_chars {
            empty_pages += 1;
        }
    }

    let threshold = ((sample + 1) / 2).max(1);
    empty_pages >= threshold
}
