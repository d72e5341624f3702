//! Benchmarks for the structure heuristics.
//!
//! Run with: cargo bench

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfstruct::model::{Block, Page, Rect};
use pdfstruct::structure::{detect_repeated_lines, locate_references, segment_sections};
use pdfstruct::IngestConfig;

/// Build a synthetic document: every page carries a running header, one
/// heading, and a run of body blocks.
fn synthetic_pages(page_count: u32, body_blocks_per_page: usize) -> Vec<Page> {
    (1..=page_count)
        .map(|number| {
            let mut blocks = Vec::new();
            blocks.push(block("Journal of Synthetic Documents", 8.0));
            blocks.push(block(&format!("Chapter {}", number), 22.0));
            for i in 0..body_blocks_per_page {
                blocks.push(block(
                    &format!(
                        "Body paragraph {} on page {} with enough words to look like prose.",
                        i, number
                    ),
                    10.0,
                ));
            }
            Page { number, blocks }
        })
        .collect()
}

fn block(text: &str, size: f32) -> Block {
    Block {
        text: text.to_string(),
        bbox: Rect::default(),
        font_sizes: vec![size],
        max_font_size: Some(size),
        avg_font_size: Some(size),
        fonts: BTreeSet::new(),
    }
}

fn bench_segment_sections(c: &mut Criterion) {
    let config = IngestConfig::default();
    let small = synthetic_pages(10, 20);
    let large = synthetic_pages(200, 40);

    c.bench_function("segment_sections_10p", |b| {
        b.iter(|| segment_sections(black_box(&small), &config))
    });
    c.bench_function("segment_sections_200p", |b| {
        b.iter(|| segment_sections(black_box(&large), &config))
    });
}

fn bench_repetition_detection(c: &mut Criterion) {
    let config = IngestConfig::default();
    let pages = synthetic_pages(200, 40);

    c.bench_function("detect_repeated_lines_200p", |b| {
        b.iter(|| detect_repeated_lines(black_box(&pages), &config))
    });
}

fn bench_reference_scan(c: &mut Criterion) {
    let mut pages = synthetic_pages(200, 40);
    pages.push(Page {
        number: 201,
        blocks: vec![block("References", 10.0), block("[1] An entry.", 10.0)],
    });

    c.bench_function("locate_references_200p", |b| {
        b.iter(|| locate_references(black_box(&pages)))
    });
}

criterion_group!(
    benches,
    bench_segment_sections,
    bench_repetition_detection,
    bench_reference_scan
);
criterion_main!(benches);
