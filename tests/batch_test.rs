//! Integration tests for the batch driver over real (generated) PDF files.

use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use pdfstruct::{process_dir, process_dir_with_cancel, IngestConfig, ManifestEntry};

/// Build a minimal one-page PDF with the given page text.
///
/// The cross-reference table carries real byte offsets, so any conforming
/// reader accepts the file.
fn minimal_pdf(text: &str) -> Vec<u8> {
    let mut buf = String::new();
    let mut offsets: Vec<usize> = Vec::new();

    buf.push_str("%PDF-1.4\n");

    offsets.push(buf.len());
    buf.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets.push(buf.len());
    buf.push_str("2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets.push(buf.len());
    buf.push_str(
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>\nendobj\n",
    );

    let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
    offsets.push(buf.len());
    buf.push_str(&format!(
        "4 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
        stream.len(),
        stream
    ));

    offsets.push(buf.len());
    buf.push_str("5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n");

    let xref_offset = buf.len();
    buf.push_str(&format!("xref\n0 {}\n", offsets.len() + 1));
    buf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        buf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    buf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_offset
    ));

    buf.into_bytes()
}

fn read_manifest(output_dir: &Path) -> Vec<ManifestEntry> {
    let bytes = fs::read(output_dir.join(pdfstruct::MANIFEST_FILENAME)).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_batch_isolates_corrupt_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let text = "This synthetic document exists to exercise the batch driver end to end.";
    fs::write(input.path().join("alpha.pdf"), minimal_pdf(text)).unwrap();
    fs::write(
        input.path().join("broken.pdf"),
        b"%PDF-1.4\nthis is not a real document body",
    )
    .unwrap();
    fs::write(input.path().join("gamma.pdf"), minimal_pdf(text)).unwrap();
    // Non-PDF files are ignored entirely
    fs::write(input.path().join("notes.txt"), b"not a pdf").unwrap();

    let entries = process_dir(input.path(), output.path(), &IngestConfig::default()).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].filename, "alpha.pdf");
    assert_eq!(entries[1].filename, "gamma.pdf");

    let manifest = read_manifest(output.path());
    assert_eq!(manifest.len(), 2);
    for entry in &manifest {
        assert!(entry.json_path.exists());
    }
    assert!(!output.path().join("broken.json").exists());
}

#[test]
fn test_batch_sequential_matches_parallel_layout() {
    let input = tempfile::tempdir().unwrap();
    let text = "Deterministic output naming should not depend on the execution mode at all.";
    fs::write(input.path().join("one.pdf"), minimal_pdf(text)).unwrap();
    fs::write(input.path().join("two.pdf"), minimal_pdf(text)).unwrap();

    let out_par = tempfile::tempdir().unwrap();
    let out_seq = tempfile::tempdir().unwrap();

    let parallel = process_dir(input.path(), out_par.path(), &IngestConfig::default()).unwrap();
    let sequential = process_dir(
        input.path(),
        out_seq.path(),
        &IngestConfig::new().sequential(),
    )
    .unwrap();

    let names = |entries: &[ManifestEntry]| {
        entries
            .iter()
            .map(|e| e.filename.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&parallel), names(&sequential));
    assert!(out_par.path().join("one.json").exists());
    assert!(out_seq.path().join("one.json").exists());
}

#[test]
fn test_batch_rerun_is_idempotent_on_paths() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let text = "Rerunning the engine must derive byte-identical output file names every time.";
    fs::write(input.path().join("report (draft).pdf"), minimal_pdf(text)).unwrap();

    let first = process_dir(input.path(), output.path(), &IngestConfig::default()).unwrap();
    let second = process_dir(input.path(), output.path(), &IngestConfig::default()).unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].json_path, second[0].json_path);
    assert!(output.path().join("report__draft_.json").exists());
}

#[test]
fn test_cancelled_batch_writes_empty_manifest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.pdf"), minimal_pdf("text")).unwrap();

    let cancel = AtomicBool::new(true);
    let entries = process_dir_with_cancel(
        input.path(),
        output.path(),
        &IngestConfig::default(),
        &cancel,
    )
    .unwrap();

    assert!(entries.is_empty());
    assert_eq!(read_manifest(output.path()).len(), 0);
}

#[test]
fn test_single_document_structure_from_real_pdf() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let text = "A single page of body text long enough to stay clear of the OCR cutoff.";
    let path = input.path().join("solo.pdf");
    fs::write(&path, minimal_pdf(text)).unwrap();

    let doc = pdfstruct::process_file(&path, output.path(), &IngestConfig::default()).unwrap();

    assert_eq!(doc.metadata.num_pages, 1);
    assert!(!doc.sections.is_empty());
    assert!(doc.raw_text.contains("body text"));
    assert!(output.path().join("solo.json").exists());
}

#[test]
fn test_process_bytes_upload_path() {
    let output = tempfile::tempdir().unwrap();
    let data = minimal_pdf("Uploaded buffers take the same pipeline as files on disk do.");

    let doc =
        pdfstruct::process_bytes(&data, "upload.pdf", output.path(), &IngestConfig::default())
            .unwrap();

    assert_eq!(doc.filename, "upload.pdf");
    assert!(output.path().join("upload.json").exists());
}

#[test]
fn test_non_pdf_bytes_rejected() {
    let output = tempfile::tempdir().unwrap();
    let result = pdfstruct::process_bytes(
        b"<!DOCTYPE html><html></html>",
        "page.html",
        output.path(),
        &IngestConfig::default(),
    );
    assert!(result.is_err());
}
