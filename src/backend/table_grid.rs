//! Table grid detection from positioned text spans.
//!
//! Stream-style detection: spans are grouped into rows by baseline, column
//! boundaries are found where left edges align across rows, and contiguous
//! row runs that fit the columns are emitted as cell matrices. No graphical
//! ruling lines are consulted.

use std::collections::{HashMap, HashSet};

use super::lopdf_backend::PositionedSpan;
use super::TableMatrix;

/// Configuration for grid detection.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Minimum number of rows to consider a region a table
    pub min_rows: usize,
    /// Minimum number of columns to consider a region a table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows, as a fraction of font size
    pub y_tolerance_factor: f32,
    /// Fraction of rows that must share a left edge for it to be a column
    pub min_alignment_ratio: f32,
    /// Minimum horizontal gap between column edges (points)
    pub min_column_gap: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 8,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

struct Row {
    spans: Vec<PositionedSpan>,
}

/// Detect tables among the spans of one page and return them as cell
/// matrices in top-to-bottom order.
pub(crate) fn detect_table_matrices(
    spans: &[PositionedSpan],
    config: &GridConfig,
) -> Vec<TableMatrix> {
    if spans.len() < config.min_rows * config.min_columns {
        return Vec::new();
    }

    let rows = group_into_rows(spans, config);
    if rows.len() < config.min_rows {
        return Vec::new();
    }

    let columns = detect_columns(&rows, config);
    log::debug!(
        "table grid: {} rows, column edges at {:?}",
        rows.len(),
        columns
    );
    if columns.len() < config.min_columns || columns.len() > config.max_columns {
        return Vec::new();
    }

    find_table_regions(&rows, &columns, config)
        .into_iter()
        .map(|(start, end)| rows_to_matrix(&rows[start..=end], &columns))
        .collect()
}

/// Group spans into rows by Y position (top to bottom).
fn group_into_rows(spans: &[PositionedSpan], config: &GridConfig) -> Vec<Row> {
    let mut sorted: Vec<PositionedSpan> = spans.to_vec();
    sorted.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut rows: Vec<Row> = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in sorted {
        let tolerance = span.font_size * config.y_tolerance_factor;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    rows.push(Row {
                        spans: std::mem::take(&mut current),
                    });
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        rows.push(Row { spans: current });
    }

    rows
}

/// Detect column boundaries from left edges that align across rows.
fn detect_columns(rows: &[Row], config: &GridConfig) -> Vec<f32> {
    // Rows with a single span carry no column signal
    let multi_span_rows: Vec<&Row> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
    if multi_span_rows.len() < config.min_rows {
        return Vec::new();
    }

    let bucket_size = 5.0;
    let mut edge_counts: HashMap<i32, usize> = HashMap::new();
    for row in &multi_span_rows {
        // Count each bucket once per row
        let mut row_buckets: HashSet<i32> = HashSet::new();
        for span in &row.spans {
            row_buckets.insert((span.x / bucket_size).round() as i32);
        }
        for bucket in row_buckets {
            *edge_counts.entry(bucket).or_insert(0) += 1;
        }
    }

    let min_occurrences =
        ((multi_span_rows.len() as f32 * config.min_alignment_ratio) as usize).max(2);

    let mut edges: Vec<f32> = edge_counts
        .iter()
        .filter(|(_, count)| **count >= min_occurrences)
        .map(|(bucket, _)| *bucket as f32 * bucket_size)
        .collect();
    edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Merge edges closer than the minimum column gap
    let mut merged: Vec<f32> = Vec::new();
    for edge in edges {
        match merged.last() {
            Some(last) if edge - last < config.min_column_gap => {}
            _ => merged.push(edge),
        }
    }

    merged
}

/// Find contiguous runs of rows that align with the detected columns.
fn find_table_regions(rows: &[Row], columns: &[f32], config: &GridConfig) -> Vec<(usize, usize)> {
    let mut regions: Vec<(usize, usize)> = Vec::new();
    let mut current_start: Option<usize> = None;

    for (i, row) in rows.iter().enumerate() {
        let aligned = alignment_score(row, columns) >= config.min_alignment_ratio
            && row.spans.len() >= config.min_columns;
        if aligned {
            if current_start.is_none() {
                current_start = Some(i);
            }
        } else if let Some(start) = current_start.take() {
            if i - start >= config.min_rows {
                regions.push((start, i - 1));
            }
        }
    }
    if let Some(start) = current_start {
        if rows.len() - start >= config.min_rows {
            regions.push((start, rows.len() - 1));
        }
    }

    regions
}

/// Fraction of a row's spans whose left edge sits on a column boundary.
fn alignment_score(row: &Row, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let tolerance = 5.0;
    let aligned = row
        .spans
        .iter()
        .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= tolerance))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Convert a run of rows into a cell matrix over the given columns.
fn rows_to_matrix(rows: &[Row], columns: &[f32]) -> TableMatrix {
    rows.iter()
        .map(|row| {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
            for span in &row.spans {
                let col = column_for_x(span.x, columns);
                cells[col].push(span.text.trim());
            }
            cells.into_iter().map(|parts| parts.join(" ")).collect()
        })
        .collect()
}

/// Find the column index for an X position: the rightmost boundary at or
/// left of it (with a small tolerance), else the nearest boundary.
fn column_for_x(x: f32, columns: &[f32]) -> usize {
    let mut chosen = 0;
    for (i, &edge) in columns.iter().enumerate() {
        if x >= edge - 10.0 {
            chosen = i;
        } else {
            break;
        }
    }
    chosen
}
