//! Reference section location.
//!
//! Once a marker block is found, every remaining block in the document is
//! reference material — there is no end marker. A "References" heading in
//! the middle of a body chapter will therefore swallow the rest of the
//! document; accepted trade-off.

use crate::model::Page;

/// Trimmed, lowercased block texts that mark the start of references.
const REFERENCE_MARKERS: &[&str] = &["references", "reference", "bibliography", "works cited"];

/// Collect all text following the first reference marker block, blank-line
/// joined. Returns an empty string when no marker exists.
pub fn locate_references(pages: &[Page]) -> String {
    let mut found = false;
    let mut parts: Vec<&str> = Vec::new();

    for page in pages {
        for block in &page.blocks {
            let trimmed = block.text.trim();
            if !found {
                let lowered = trimmed.to_lowercase();
                if REFERENCE_MARKERS.contains(&lowered.as_str()) {
                    found = true;
                }
                continue;
            }
            parts.push(trimmed);
        }
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Rect};
    use std::collections::BTreeSet;

    fn block(text: &str) -> Block {
        Block {
            text: text.to_string(),
            bbox: Rect::default(),
            font_sizes: vec![],
            max_font_size: None,
            avg_font_size: None,
            fonts: BTreeSet::new(),
        }
    }

    fn page(number: u32, texts: &[&str]) -> Page {
        Page {
            number,
            blocks: texts.iter().map(|t| block(t)).collect(),
        }
    }

    #[test]
    fn test_marker_collects_following_blocks() {
        let pages = vec![
            page(1, &["Introduction", "Some body text"]),
            page(2, &[]),
            page(3, &["References"]),
            page(4, &["[1] First citation", "[2] Second citation"]),
        ];
        assert_eq!(
            locate_references(&pages),
            "[1] First citation\n\n[2] Second citation"
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let pages = vec![page(1, &["BIBLIOGRAPHY", "Entry one"])];
        assert_eq!(locate_references(&pages), "Entry one");
    }

    #[test]
    fn test_no_marker_yields_empty() {
        let pages = vec![page(1, &["Body only, nothing else"])];
        assert_eq!(locate_references(&pages), "");
    }

    #[test]
    fn test_marker_must_be_whole_block() {
        let pages = vec![page(1, &["References and further reading", "tail"])];
        assert_eq!(locate_references(&pages), "");
    }

    #[test]
    fn test_crosses_page_boundaries() {
        let pages = vec![
            page(1, &["Works Cited"]),
            page(2, &["Entry A"]),
            page(3, &["Entry B"]),
        ];
        assert_eq!(locate_references(&pages), "Entry A\n\nEntry B");
    }
}
