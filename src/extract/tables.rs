//! Table extraction and CSV persistence.

use std::fs;
use std::path::Path;

use uuid::Uuid;

use super::{write_atomic, PageOutcome, SkippedPage};
use crate::backend::{LayoutBackend, TableMatrix};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::model::TableRecord;

/// Result of table extraction over a whole document.
#[derive(Debug)]
pub struct TableExtraction {
    /// One record per persisted table, in page order
    pub records: Vec<TableRecord>,
    /// Pages whose table detection failed
    pub skipped: Vec<SkippedPage>,
}

/// Extract every table in the document and persist each as CSV under
/// `{output_dir}/tables/{stem}_p{page}_table{index}.csv`.
///
/// A page where detection fails is skipped, never fatal; an I/O failure
/// writing a CSV is fatal for the document.
pub fn extract_tables(
    backend: &dyn LayoutBackend,
    stem: &str,
    output_dir: &Path,
    config: &IngestConfig,
) -> Result<TableExtraction> {
    let tables_dir = output_dir.join("tables");
    let mut dir_created = false;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for page in 1..=backend.page_count() {
        let outcome = match backend.page_tables(page) {
            Ok(matrices) => PageOutcome::Extracted(matrices),
            Err(e) => PageOutcome::Skipped {
                reason: e.to_string(),
            },
        };

        let matrices = match outcome {
            PageOutcome::Extracted(matrices) => matrices,
            PageOutcome::Skipped { reason } => {
                skipped.push(SkippedPage { page, reason });
                continue;
            }
        };

        for (index, matrix) in matrices.into_iter().enumerate() {
            if !dir_created {
                fs::create_dir_all(&tables_dir)?;
                dir_created = true;
            }

            let filename = format!("{}_p{}_table{}.csv", stem, page, index + 1);
            let csv_path = tables_dir.join(filename);
            write_atomic(&csv_path, &to_csv(&matrix))?;

            let rows = matrix.len();
            let cols = matrix.first().map(|r| r.len()).unwrap_or(0);
            records.push(TableRecord {
                table_id: Uuid::new_v4(),
                page,
                storage_path: csv_path,
                rows,
                cols,
                raw_cells: config.embed_table_cells.then_some(matrix),
            });
        }
    }

    Ok(TableExtraction { records, skipped })
}

/// Render a cell matrix as CSV bytes (no header row).
fn to_csv(matrix: &TableMatrix) -> Vec<u8> {
    let mut out = String::new();
    for row in matrix {
        let line = row
            .iter()
            .map(|cell| escape_csv_field(cell))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out.into_bytes()
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_to_csv_matrix() {
        let matrix: TableMatrix = vec![
            vec!["Name".to_string(), "Value".to_string()],
            vec!["a,b".to_string(), "2".to_string()],
        ];
        let csv = String::from_utf8(to_csv(&matrix)).unwrap();
        assert_eq!(csv, "Name,Value\n\"a,b\",2\n");
    }
}
