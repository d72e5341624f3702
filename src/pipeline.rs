//! Per-document processing pipeline.
//!
//! Orchestrates the full flow for one file: metadata, block normalization,
//! repeated-header removal, section segmentation, table and image
//! extraction, reference location, raw-text assembly, the scanned check,
//! and finally the JSON write. Later steps depend on the filtered block set,
//! so a document is processed sequentially; parallelism lives in the batch
//! driver.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::backend::{LayoutBackend, LopdfBackend};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::extract::{self, write_atomic};
use crate::model::ProcessedDocument;
use crate::structure;

/// Process a single PDF file and write its JSON, tables, and images under
/// `output_dir`.
pub fn process_file(
    path: &Path,
    output_dir: &Path,
    config: &IngestConfig,
) -> Result<ProcessedDocument> {
    let backend = LopdfBackend::open(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    process_with_backend(&backend, &filename, output_dir, config)
}

/// Process a PDF held in memory (the upload path), writing outputs as if it
/// had been read from a file named `filename`.
pub fn process_bytes(
    data: &[u8],
    filename: &str,
    output_dir: &Path,
    config: &IngestConfig,
) -> Result<ProcessedDocument> {
    let backend = LopdfBackend::from_bytes(data)?;
    process_with_backend(&backend, filename, output_dir, config)
}

/// Process a document through any [`LayoutBackend`].
pub fn process_with_backend(
    backend: &dyn LayoutBackend,
    filename: &str,
    output_dir: &Path,
    config: &IngestConfig,
) -> Result<ProcessedDocument> {
    log::info!("processing {}", filename);

    let metadata = backend.metadata();

    let mut pages = structure::normalize_document(backend);

    let repeated = structure::detect_repeated_lines(&pages, config);
    if !repeated.is_empty() {
        log::debug!(
            "{}: removing {} repeated header/footer lines",
            filename,
            repeated.len()
        );
        structure::remove_repeated_lines(&mut pages, &repeated);
    }

    let sections = structure::segment_sections(&pages, config);

    let file_stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let stem = sanitize_stem(&file_stem);

    let tables = extract::extract_tables(backend, &stem, output_dir, config)?;
    for skip in &tables.skipped {
        log::warn!(
            "{}: table extraction skipped on page {}: {}",
            filename,
            skip.page,
            skip.reason
        );
    }

    let figures = extract::extract_images(backend, &stem, output_dir)?;
    for skip in &figures.skipped {
        log::warn!(
            "{}: image extraction skipped on page {}: {}",
            filename,
            skip.page,
            skip.reason
        );
    }

    let references = structure::locate_references(&pages);

    let raw_text = pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let needs_ocr = structure::needs_ocr(backend, config);

    // Title fallback chain: metadata title, first section heading, file stem
    let title = metadata
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .or_else(|| sections.first().map(|s| s.heading.clone()))
        .unwrap_or_else(|| file_stem.clone());

    let document = ProcessedDocument {
        doc_id: Uuid::new_v4(),
        filename: filename.to_string(),
        title,
        metadata,
        sections,
        tables: tables.records,
        figures: figures.records,
        references,
        raw_text,
        needs_ocr,
    };

    fs::create_dir_all(output_dir)?;
    let json = serde_json::to_vec_pretty(&document)?;
    let json_path = output_dir.join(format!("{}.json", stem));
    write_atomic(&json_path, &json)?;
    log::info!("saved processed document to {}", json_path.display());

    Ok(document)
}

/// The JSON path a source file's processed document is written to.
pub fn document_json_path(output_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.json", sanitize_stem(&stem)))
}

/// Sanitize a filename stem for use in derived output paths: alphanumerics,
/// `.`, `_`, and `-` survive, everything else becomes `_`; capped at 200
/// characters. Deterministic, so reruns derive identical paths.
pub fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(200)
        .collect()
}
