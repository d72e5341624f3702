//! Header/footer repetition detection.
//!
//! Short lines that recur on a large fraction of pages are almost always
//! running headers, footers, or page furniture. Detection is exact-string
//! on trimmed text; near-duplicates (e.g., headers with embedded page
//! numbers) are not caught.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::IngestConfig;
use crate::model::Page;

/// Find short block texts that repeat across at least
/// `max(2, ceil(repeat_ratio * page_count))` distinct pages.
pub fn detect_repeated_lines(pages: &[Page], config: &IngestConfig) -> HashSet<String> {
    let mut page_counts: HashMap<&str, usize> = HashMap::new();

    for page in pages {
        // Count each text once per page
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for block in &page.blocks {
            let text = block.text.trim();
            if text.chars().count() < config.short_text_cutoff {
                seen.insert(text);
            }
        }
        for text in seen {
            *page_counts.entry(text).or_insert(0) += 1;
        }
    }

    let threshold = ((config.repeat_ratio * pages.len() as f64).ceil() as usize).max(2);

    page_counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(text, _)| text.to_string())
        .collect()
}

/// Remove every block whose trimmed text matches a repeated line.
pub fn remove_repeated_lines(pages: &mut [Page], repeated: &HashSet<String>) {
    if repeated.is_empty() {
        return;
    }
    for page in pages.iter_mut() {
        page.blocks.retain(|b| !repeated.contains(b.text.trim()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Rect};
    use std::collections::BTreeSet as FontSet;

    fn block(text: &str) -> Block {
        Block {
            text: text.to_string(),
            bbox: Rect::default(),
            font_sizes: vec![10.0],
            max_font_size: Some(10.0),
            avg_font_size: Some(10.0),
            fonts: FontSet::new(),
        }
    }

    fn doc_with_header(pages: usize, header_on: usize) -> Vec<Page> {
        (1..=pages)
            .map(|n| {
                let mut blocks = Vec::new();
                if n <= header_on {
                    blocks.push(block("Journal of Testing"));
                }
                blocks.push(block(&format!("Body paragraph for page {}", n)));
                Page {
                    number: n as u32,
                    blocks,
                }
            })
            .collect()
    }

    #[test]
    fn test_header_at_threshold_removed() {
        // ceil(0.3 * 10) = 3 pages is enough
        let mut pages = doc_with_header(10, 3);
        let repeated = detect_repeated_lines(&pages, &IngestConfig::default());
        assert!(repeated.contains("Journal of Testing"));

        remove_repeated_lines(&mut pages, &repeated);
        assert!(pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .all(|b| b.text != "Journal of Testing"));
        // Body text survives
        assert_eq!(pages[0].blocks.len(), 1);
    }

    #[test]
    fn test_below_threshold_retained() {
        let pages = doc_with_header(10, 2);
        let repeated = detect_repeated_lines(&pages, &IngestConfig::default());
        assert!(repeated.is_empty());
    }

    #[test]
    fn test_long_text_never_counted() {
        let long_line = "x".repeat(200);
        let pages: Vec<Page> = (1..=10)
            .map(|n| Page {
                number: n,
                blocks: vec![block(&long_line)],
            })
            .collect();
        let repeated = detect_repeated_lines(&pages, &IngestConfig::default());
        assert!(repeated.is_empty());
    }

    #[test]
    fn test_duplicates_within_one_page_count_once() {
        // Same text twice on a single page of a 10-page doc: one page of
        // occurrences, below the 3-page threshold
        let mut pages = doc_with_header(10, 0);
        pages[0].blocks.push(block("Stray line"));
        pages[0].blocks.push(block("Stray line"));
        let repeated = detect_repeated_lines(&pages, &IngestConfig::default());
        assert!(!repeated.contains("Stray line"));
    }

    #[test]
    fn test_tiny_documents_never_trigger() {
        let pages = doc_with_header(1, 1);
        let repeated = detect_repeated_lines(&pages, &IngestConfig::default());
        assert!(repeated.is_empty());
    }
}
