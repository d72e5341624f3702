//! Batch driver: process a directory of PDFs and build a manifest.
//!
//! Documents share no mutable state, so files run on a rayon pool; derived
//! output paths are distinct per sanitized stem, so concurrent writers never
//! collide. The manifest has exactly one writer, after all workers finish.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::IngestConfig;
use crate::error::Result;
use crate::extract::write_atomic;
use crate::model::ManifestEntry;
use crate::pipeline;

/// Name of the manifest file written after a batch run.
pub const MANIFEST_FILENAME: &str = "documents_manifest.json";

/// Process every `.pdf` file in `input_dir` (sorted by name) and write one
/// JSON per document plus a manifest of the successes.
///
/// A single file's failure is logged and excluded from the manifest; the
/// batch always runs to completion.
pub fn process_dir(
    input_dir: &Path,
    output_dir: &Path,
    config: &IngestConfig,
) -> Result<Vec<ManifestEntry>> {
    let cancel = AtomicBool::new(false);
    process_dir_with_cancel(input_dir, output_dir, config, &cancel)
}

/// Like [`process_dir`], with cooperative cancellation checked between
/// files. Files already processed when `cancel` flips stay in the manifest.
pub fn process_dir_with_cancel(
    input_dir: &Path,
    output_dir: &Path,
    config: &IngestConfig,
    cancel: &AtomicBool,
) -> Result<Vec<ManifestEntry>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();

    log::info!(
        "batch: {} PDF files under {}",
        files.len(),
        input_dir.display()
    );
    fs::create_dir_all(output_dir)?;

    let run_one = |path: &PathBuf| -> Option<ManifestEntry> {
        if cancel.load(Ordering::Relaxed) {
            log::info!("batch cancelled, skipping {}", path.display());
            return None;
        }
        match pipeline::process_file(path, output_dir, config) {
            Ok(document) => Some(ManifestEntry {
                doc_id: document.doc_id,
                filename: document.filename,
                json_path: pipeline::document_json_path(output_dir, path),
            }),
            Err(e) => {
                log::error!("failed to process {}: {}", path.display(), e);
                None
            }
        }
    };

    let entries: Vec<ManifestEntry> = if config.parallel {
        files.par_iter().filter_map(run_one).collect()
    } else {
        files.iter().filter_map(run_one).collect()
    };

    let manifest_path = output_dir.join(MANIFEST_FILENAME);
    let json = serde_json::to_vec_pretty(&entries)?;
    write_atomic(&manifest_path, &json)?;
    log::info!(
        "wrote manifest with {} entries to {}",
        entries.len(),
        manifest_path.display()
    );

    Ok(entries)
}
