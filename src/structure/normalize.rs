//! Block normalization: raw layout groups to uniform text blocks.

use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;

use crate::backend::{GroupKind, LayoutBackend, SpanGroup};
use crate::model::{Block, Page};

/// Normalize one page of layout groups into blocks.
///
/// Text spans are concatenated in reading order and NFC-normalized; font
/// sizes and distinct font names are aggregated. Non-text groups are
/// skipped, as are groups whose text trims to nothing, so every returned
/// block has non-empty text. Sizes of zero or less count as missing.
pub fn normalize_page(number: u32, groups: Vec<SpanGroup>) -> Page {
    let mut blocks = Vec::new();

    for group in groups {
        if group.kind != GroupKind::Text {
            continue;
        }

        let mut raw_text = String::new();
        let mut font_sizes: Vec<f32> = Vec::new();
        let mut fonts: BTreeSet<String> = BTreeSet::new();

        for span in group.spans {
            raw_text.push_str(&span.text);
            if let Some(size) = span.font_size.filter(|s| *s > 0.0) {
                font_sizes.push(size);
            }
            if !span.font_name.is_empty() {
                fonts.insert(span.font_name);
            }
        }

        let text = raw_text.nfc().collect::<String>().trim().to_string();
        if text.is_empty() {
            continue;
        }

        let max_font_size = font_sizes.iter().copied().reduce(f32::max);
        let avg_font_size = if font_sizes.is_empty() {
            None
        } else {
            Some(font_sizes.iter().sum::<f32>() / font_sizes.len() as f32)
        };

        blocks.push(Block {
            text,
            bbox: group.bbox,
            font_sizes,
            max_font_size,
            avg_font_size,
            fonts,
        });
    }

    Page { number, blocks }
}

/// Normalize every page of a document.
///
/// A page whose span extraction fails is logged and kept as an empty page,
/// so one malformed page never aborts the document.
pub fn normalize_document(backend: &dyn LayoutBackend) -> Vec<Page> {
    let page_count = backend.page_count();
    let mut pages = Vec::with_capacity(page_count as usize);

    for number in 1..=page_count {
        let groups = match backend.page_spans(number) {
            Ok(groups) => groups,
            Err(e) => {
                log::warn!("span extraction failed on page {}: {}", number, e);
                Vec::new()
            }
        };
        pages.push(normalize_page(number, groups));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawSpan;
    use crate::model::Rect;

    fn text_group(parts: &[(&str, Option<f32>)]) -> SpanGroup {
        SpanGroup {
            kind: GroupKind::Text,
            bbox: Rect::new(0.0, 0.0, 100.0, 10.0),
            spans: parts
                .iter()
                .map(|(text, size)| RawSpan {
                    text: text.to_string(),
                    font_size: *size,
                    font_name: "Helvetica".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_spans_merge_with_font_stats() {
        let group = text_group(&[("Hello ", Some(12.0)), ("world", Some(14.0))]);
        let page = normalize_page(1, vec![group]);

        assert_eq!(page.blocks.len(), 1);
        let block = &page.blocks[0];
        assert_eq!(block.text, "Hello world");
        assert_eq!(block.font_sizes, vec![12.0, 14.0]);
        assert_eq!(block.max_font_size, Some(14.0));
        assert_eq!(block.avg_font_size, Some(13.0));
        assert!(block.fonts.contains("Helvetica"));
    }

    #[test]
    fn test_whitespace_blocks_dropped() {
        let groups = vec![
            text_group(&[("   \n\t ", Some(12.0))]),
            text_group(&[("kept", Some(12.0))]),
        ];
        let page = normalize_page(1, groups);

        assert_eq!(page.blocks.len(), 1);
        assert!(page.blocks.iter().all(|b| !b.text.trim().is_empty()));
    }

    #[test]
    fn test_non_text_groups_skipped() {
        let image = SpanGroup {
            kind: GroupKind::Image,
            bbox: Rect::default(),
            spans: Vec::new(),
        };
        let page = normalize_page(1, vec![image, text_group(&[("text", Some(10.0))])]);
        assert_eq!(page.blocks.len(), 1);
    }

    #[test]
    fn test_missing_and_zero_sizes() {
        let group = text_group(&[("no size", None), ("zero", Some(0.0))]);
        let page = normalize_page(1, vec![group]);

        let block = &page.blocks[0];
        assert!(block.font_sizes.is_empty());
        assert_eq!(block.max_font_size, None);
        assert_eq!(block.avg_font_size, None);
    }

    #[test]
    fn test_nfc_normalization() {
        // 'e' + combining acute accent composes to a single char
        let group = text_group(&[("Cafe\u{0301}", Some(12.0))]);
        let page = normalize_page(1, vec![group]);
        assert_eq!(page.blocks[0].text, "Caf\u{00E9}");
    }
}
