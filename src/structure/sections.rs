//! Heading detection and section segmentation.
//!
//! Font sizes vary by document template, so the heading cutoff is a
//! per-document percentile of the max-font-size distribution rather than an
//! absolute size. Blocks at or above the cutoff open a new section; all
//! other blocks accumulate into the current one.

use uuid::Uuid;

use crate::config::IngestConfig;
use crate::model::{Page, Section};

/// Partition the filtered block stream into sections.
///
/// When no block anywhere carries font-size data, falls back to one section
/// per page so every document yields at least one section.
pub fn segment_sections(pages: &[Page], config: &IngestConfig) -> Vec<Section> {
    let sizes: Vec<f32> = pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .filter_map(|b| b.max_font_size.filter(|s| *s > 0.0))
        .collect();

    if sizes.is_empty() {
        return pages
            .iter()
            .map(|page| Section {
                section_id: Uuid::new_v4(),
                heading: format!("Page {}", page.number),
                text: page.plain_text(),
                start_page: page.number,
                end_page: page.number,
            })
            .collect();
    }

    let threshold = percentile(&sizes, config.heading_percentile);
    log::debug!(
        "heading threshold {:.1}pt ({}th percentile of {} sizes)",
        threshold,
        config.heading_percentile,
        sizes.len()
    );

    let mut sections: Vec<Section> = Vec::new();
    let mut current = SectionBuilder::default();

    for page in pages {
        for block in &page.blocks {
            let is_heading = block
                .max_font_size
                .filter(|s| *s > 0.0)
                .is_some_and(|s| s >= threshold);

            if is_heading {
                if let Some(done) = std::mem::take(&mut current).finish("Untitled") {
                    sections.push(done);
                }
                current = SectionBuilder::with_heading(block.text.trim(), page.number);
            } else {
                current.append(block.text.trim(), page.number);
            }
        }
    }

    if let Some(done) = current.finish("Introduction") {
        sections.push(done);
    }

    sections
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(values: &[f32], q: f64) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (n - 1) as f64 * q / 100.0;
    let lo = rank.floor() as usize;
    let frac = (rank - lo as f64) as f32;
    if lo + 1 < n {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Accumulates blocks into one section until the next heading.
#[derive(Default)]
struct SectionBuilder {
    heading: Option<String>,
    parts: Vec<String>,
    start_page: Option<u32>,
    end_page: Option<u32>,
}

impl SectionBuilder {
    fn with_heading(heading: &str, page: u32) -> Self {
        Self {
            heading: Some(heading.to_string()),
            parts: Vec::new(),
            start_page: Some(page),
            end_page: Some(page),
        }
    }

    fn append(&mut self, text: &str, page: u32) {
        if self.start_page.is_none() {
            self.start_page = Some(page);
        }
        self.end_page = Some(page);
        self.parts.push(text.to_string());
    }

    /// Finalize into a section, or `None` when nothing accumulated.
    fn finish(self, fallback_heading: &str) -> Option<Section> {
        if self.heading.is_none() && self.parts.is_empty() {
            return None;
        }
        let start_page = self.start_page.unwrap_or(1);
        let end_page = self.end_page.unwrap_or(start_page);
        Some(Section {
            section_id: Uuid::new_v4(),
            heading: self
                .heading
                .unwrap_or_else(|| fallback_heading.to_string()),
            text: self.parts.join("\n\n"),
            start_page,
            end_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Rect};
    use std::collections::BTreeSet;

    fn block(text: &str, size: Option<f32>) -> Block {
        Block {
            text: text.to_string(),
            bbox: Rect::default(),
            font_sizes: size.into_iter().collect(),
            max_font_size: size,
            avg_font_size: size,
            fonts: BTreeSet::new(),
        }
    }

    fn page(number: u32, blocks: Vec<Block>) -> Page {
        Page { number, blocks }
    }

    #[test]
    fn test_percentile_interpolates() {
        let sizes = [10.0, 10.0, 10.0, 10.0, 24.0];
        let t = percentile(&sizes, 90.0);
        assert!((t - 18.4).abs() < 1e-4);
    }

    #[test]
    fn test_ninetieth_percentile_heading() {
        // Only the size-24 block clears the threshold
        let pages = vec![page(
            1,
            vec![
                block("body one", Some(10.0)),
                block("body two", Some(10.0)),
                block("body three", Some(10.0)),
                block("body four", Some(10.0)),
                block("Big Heading", Some(24.0)),
            ],
        )];
        let sections = segment_sections(&pages, &IngestConfig::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Untitled");
        assert_eq!(
            sections[0].text,
            "body one\n\nbody two\n\nbody three\n\nbody four"
        );
        assert_eq!(sections[1].heading, "Big Heading");
        assert_eq!(sections[1].text, "");
    }

    #[test]
    fn test_fallback_one_section_per_page() {
        let pages = vec![
            page(1, vec![block("first page text", None)]),
            page(2, vec![block("second page text", None)]),
            page(3, vec![]),
        ];
        let sections = segment_sections(&pages, &IngestConfig::default());

        assert_eq!(sections.len(), 3);
        for (i, section) in sections.iter().enumerate() {
            let n = (i + 1) as u32;
            assert_eq!(section.heading, format!("Page {}", n));
            assert_eq!(section.start_page, n);
            assert_eq!(section.end_page, n);
        }
        assert_eq!(sections[0].text, "first page text");
        assert_eq!(sections[2].text, "");
    }

    #[test]
    fn test_sections_span_pages() {
        let pages = vec![
            page(
                1,
                vec![block("Methods", Some(20.0)), block("setup", Some(10.0))],
            ),
            page(2, vec![block("more setup", Some(10.0))]),
            page(
                3,
                vec![block("Results", Some(20.0)), block("findings", Some(10.0))],
            ),
        ];
        let sections = segment_sections(&pages, &IngestConfig::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Methods");
        assert_eq!(sections[0].text, "setup\n\nmore setup");
        assert_eq!(sections[0].start_page, 1);
        assert_eq!(sections[0].end_page, 2);
        assert_eq!(sections[1].heading, "Results");
        assert_eq!(sections[1].start_page, 3);
        assert_eq!(sections[1].end_page, 3);
    }

    #[test]
    fn test_consecutive_headings_emit_empty_sections() {
        let pages = vec![page(
            1,
            vec![
                block("Part One", Some(20.0)),
                block("Part Two", Some(20.0)),
                block("body", Some(10.0)),
            ],
        )];
        let sections = segment_sections(&pages, &IngestConfig::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Part One");
        assert_eq!(sections[0].text, "");
        assert_eq!(sections[1].heading, "Part Two");
        assert_eq!(sections[1].text, "body");
    }

    #[test]
    fn test_body_before_first_heading_is_untitled() {
        let pages = vec![page(
            1,
            vec![block("just text", Some(10.0)), block("Heading", Some(30.0))],
        )];
        let sections = segment_sections(&pages, &IngestConfig::default());
        assert_eq!(sections[0].heading, "Untitled");
        assert_eq!(sections[0].text, "just text");
        assert_eq!(sections[1].heading, "Heading");
    }

    #[test]
    fn test_builder_fallback_headings() {
        let mut builder = SectionBuilder::default();
        builder.append("text", 2);
        let section = builder.finish("Introduction").unwrap();
        assert_eq!(section.heading, "Introduction");
        assert_eq!(section.start_page, 2);
        assert_eq!(section.end_page, 2);

        // Nothing accumulated: no section at all
        assert!(SectionBuilder::default().finish("Untitled").is_none());
    }

    #[test]
    fn test_page_invariant_holds() {
        let pages = vec![
            page(1, vec![block("Title", Some(20.0))]),
            page(2, vec![block("body", Some(10.0))]),
        ];
        let sections = segment_sections(&pages, &IngestConfig::default());
        for section in &sections {
            assert!(section.start_page <= section.end_page);
        }
    }
}
