//! Concrete layout backend built on `lopdf`.
//!
//! Extracts positioned text spans by walking page content streams with a
//! text-matrix, reads metadata from the information dictionary, and pulls
//! embedded images out of page XObjects. Spans are grouped into line-based
//! layout groups before they cross the [`LayoutBackend`] boundary, so the
//! engine sees paragraph-shaped primitives rather than raw operators.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::table_grid::{detect_table_matrices, GridConfig};
use super::{ExtractedImage, GroupKind, LayoutBackend, RawSpan, SpanGroup, TableMatrix};
use crate::error::{Error, Result};
use crate::model::{DocMetadata, Rect};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Layout backend backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    grid: GridConfig,
}

/// A text span with page position, produced by the content-stream walk.
#[derive(Debug, Clone)]
pub(crate) struct PositionedSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
}

impl LopdfBackend {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        verify_pdf_header(path)?;
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self {
            doc,
            grid: GridConfig::default(),
        })
    }

    /// Open a PDF from an in-memory buffer (the upload path).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_pdf_magic(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self {
            doc,
            grid: GridConfig::default(),
        })
    }

    /// Override the table-grid detection configuration.
    pub fn with_grid_config(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, pages.len() as u32))
    }

    /// Raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return Ok(s
                        .decompressed_content()
                        .unwrap_or_else(|_| s.content.clone()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            let data = s
                                .decompressed_content()
                                .unwrap_or_else(|_| s.content.clone());
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Extract positioned text spans from a page.
    pub(crate) fn extract_positioned_spans(&self, page: u32) -> Result<Vec<PositionedSpan>> {
        let page_id = self.page_id(page)?;

        let lopdf_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // Base font display names, keyed by resource name
        let mut font_names: HashMap<Vec<u8>, String> = HashMap::new();
        for (name, font) in &lopdf_fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            font_names.insert(name.clone(), base_font);
        }

        let content = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            current_font_name = name.clone();
                            current_font = font_names
                                .get(name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if !in_text {
                        continue;
                    }
                    let encoding = lopdf_fonts
                        .get(&current_font_name)
                        .and_then(|f| f.get_font_encoding(&self.doc).ok());
                    let decode = |bytes: &[u8]| {
                        if let Some(ref enc) = encoding {
                            if let Ok(text) = LopdfDocument::decode_text(enc, bytes) {
                                return text;
                            }
                        }
                        decode_text_simple(bytes)
                    };

                    let text = if op.operator == "TJ" {
                        // Array of strings and kerning adjustments; large
                        // negative adjustments stand in for word spaces
                        if let Some(Object::Array(arr)) = op.operands.first() {
                            decode_tj_array(arr, &decode)
                        } else {
                            String::new()
                        }
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        decode(bytes)
                    } else {
                        String::new()
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        spans.push(make_span(
                            text,
                            x,
                            y,
                            current_font_size * matrix.scale(),
                            current_font.clone(),
                        ));
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let encoding = lopdf_fonts
                            .get(&current_font_name)
                            .and_then(|f| f.get_font_encoding(&self.doc).ok());
                        let text = if let Some(ref enc) = encoding {
                            LopdfDocument::decode_text(enc, bytes)
                                .unwrap_or_else(|_| decode_text_simple(bytes))
                        } else {
                            decode_text_simple(bytes)
                        };
                        if !text.trim().is_empty() {
                            let (x, y) = matrix.position();
                            spans.push(make_span(
                                text,
                                x,
                                y,
                                current_font_size * matrix.scale(),
                                current_font.clone(),
                            ));
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Extract an image XObject as raw bytes plus reported properties.
    fn extract_image(&self, obj_ref: ObjectId) -> Result<ExtractedImage> {
        let stream = self
            .doc
            .get_object(obj_ref)
            .map_err(|e| Error::ImageExtract(e.to_string()))?;

        let Object::Stream(stream) = stream else {
            return Err(Error::ImageExtract("Invalid XObject".to_string()));
        };
        let dict = &stream.dict;

        if let Ok(subtype) = dict.get(b"Subtype") {
            match subtype.as_name_str() {
                Ok("Image") => {}
                _ => return Err(Error::ImageExtract("Not an image XObject".to_string())),
            }
        }

        let width = dict
            .get(b"Width")
            .ok()
            .and_then(|w| w.as_i64().ok())
            .map(|w| w as u32);
        let height = dict
            .get(b"Height")
            .ok()
            .and_then(|h| h.as_i64().ok())
            .map(|h| h as u32);

        let filter = dict
            .get(b"Filter")
            .ok()
            .and_then(|f| f.as_name_str().ok())
            .unwrap_or("");

        let (format, data) = match filter {
            // JPEG and JPEG 2000 payloads are written out verbatim
            "DCTDecode" => ("jpg".to_string(), stream.content.clone()),
            "JPXDecode" => ("jp2".to_string(), stream.content.clone()),
            _ => {
                let decoded = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                let format = sniff_image_ext(&decoded).unwrap_or("raw").to_string();
                (format, decoded)
            }
        };

        Ok(ExtractedImage {
            data,
            format,
            width,
            height,
        })
    }
}

impl LayoutBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn metadata(&self) -> DocMetadata {
        let mut metadata = DocMetadata {
            num_pages: self.page_count(),
            ..Default::default()
        };

        if let Ok(info) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    metadata.title = dict_string(info_dict, b"Title");
                    metadata.author = dict_string(info_dict, b"Author");
                    metadata.subject = dict_string(info_dict, b"Subject");
                    metadata.producer = dict_string(info_dict, b"Producer");
                    metadata.creation_date = dict_string(info_dict, b"CreationDate")
                        .as_deref()
                        .and_then(parse_pdf_date);
                    metadata.mod_date = dict_string(info_dict, b"ModDate")
                        .as_deref()
                        .and_then(parse_pdf_date);
                }
            }
        }

        metadata
    }

    fn page_spans(&self, page: u32) -> Result<Vec<SpanGroup>> {
        let spans = self.extract_positioned_spans(page)?;
        Ok(group_spans(spans))
    }

    fn page_tables(&self, page: u32) -> Result<Vec<TableMatrix>> {
        let spans = self.extract_positioned_spans(page)?;
        Ok(detect_table_matrices(&spans, &self.grid))
    }

    fn page_images(&self, page: u32) -> Result<Vec<ExtractedImage>> {
        let page_id = self.page_id(page)?;
        let mut images = Vec::new();

        let Ok(page_dict) = self.doc.get_dictionary(page_id) else {
            return Ok(images);
        };
        let Ok(resources) = page_dict.get(b"Resources") else {
            return Ok(images);
        };
        let res_dict = match resources {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        };
        let Some(res_dict) = res_dict else {
            return Ok(images);
        };
        let Ok(xobjects) = res_dict.get(b"XObject") else {
            return Ok(images);
        };
        let xobj_dict = match xobjects {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        };
        let Some(xobj_dict) = xobj_dict else {
            return Ok(images);
        };

        for (_name, obj) in xobj_dict.iter() {
            if let Ok(obj_ref) = obj.as_reference() {
                // Non-image XObjects (forms) are skipped, not errors
                if let Ok(image) = self.extract_image(obj_ref) {
                    images.push(image);
                }
            }
        }

        Ok(images)
    }

    fn page_plain_text(&self, page: u32) -> Result<String> {
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("page {}: {}", page, e)))
    }
}

/// Check the `%PDF-` magic and version marker at the start of a file.
fn verify_pdf_header(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    let n = reader.read(&mut header)?;
    check_pdf_magic(&header[..n])
}

/// Check the `%PDF-` magic and version marker in a byte prefix.
fn check_pdf_magic(data: &[u8]) -> Result<()> {
    if data.len() < PDF_MAGIC.len() + 3 || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    let version = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + 3];
    if version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit() {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        ))
    }
}

fn make_span(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> PositionedSpan {
    // Width estimate: half an em per character
    let width = text.chars().count() as f32 * font_size * 0.5;
    PositionedSpan {
        text,
        x,
        y,
        width,
        font_size,
        font_name,
    }
}

/// Decode a TJ array: strings interleaved with kerning adjustments.
fn decode_tj_array(arr: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    // Adjustments are in 1/1000 text-space units; beyond this magnitude
    // they are treated as word spaces
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in arr {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode(bytes));
            }
            Object::Integer(n) => {
                push_space_for_adjustment(&mut combined, -(*n as f32), SPACE_THRESHOLD);
            }
            Object::Real(n) => {
                push_space_for_adjustment(&mut combined, -n, SPACE_THRESHOLD);
            }
            _ => {}
        }
    }
    combined
}

fn push_space_for_adjustment(combined: &mut String, adjustment: f32, threshold: f32) {
    if adjustment > threshold
        && !combined.is_empty()
        && !combined.ends_with(' ')
        && !combined.ends_with('\u{00A0}')
    {
        if let Some(c) = combined.chars().last() {
            if !is_spaceless_script_char(c) {
                combined.push(' ');
            }
        }
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

/// Check if a character belongs to a script that does not use word spaces
/// (Chinese ideographs, kana). Hangul uses spaces and is excluded.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Group positioned spans into line-based layout groups.
///
/// Spans are sorted top-to-bottom (PDF Y is bottom-up), merged into lines by
/// baseline proximity, and lines are merged into groups until the vertical
/// gap or font size changes noticeably.
pub(crate) fn group_spans(spans: Vec<PositionedSpan>) -> Vec<SpanGroup> {
    let lines = group_into_lines(spans);
    if lines.is_empty() {
        return Vec::new();
    }

    let avg_spacing = average_line_spacing(&lines);

    let mut groups: Vec<SpanGroup> = Vec::new();
    let mut current: Vec<Line> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            let gap = (prev.y - line.y).abs();
            let size_change = (prev.font_size - line.font_size).abs() > 1.0;
            if gap > avg_spacing * 1.5 || size_change {
                groups.push(make_group(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        groups.push(make_group(current));
    }

    groups
}

struct Line {
    spans: Vec<PositionedSpan>,
    y: f32,
    font_size: f32,
}

fn group_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<Line> {
    if spans.is_empty() {
        return Vec::new();
    }

    // Sort by Y descending (top to bottom), then X ascending
    spans.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(line_from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(line_from_spans(current));
    }

    lines
}

fn line_from_spans(mut spans: Vec<PositionedSpan>) -> Line {
    spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    // Dominant font size, weighted by text length
    let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
    let weighted: f32 = spans.iter().map(|s| s.font_size * s.text.len() as f32).sum();
    let font_size = if total_chars > 0 {
        weighted / total_chars as f32
    } else {
        spans[0].font_size
    };
    let y = spans[0].y;

    Line {
        spans,
        y,
        font_size,
    }
}

fn average_line_spacing(lines: &[Line]) -> f32 {
    if lines.len() < 2 {
        return 12.0;
    }
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();
    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn make_group(lines: Vec<Line>) -> SpanGroup {
    let mut x0 = f32::MAX;
    let mut y0 = f32::MAX;
    let mut x1 = f32::MIN;
    let mut y1 = f32::MIN;
    let mut spans = Vec::new();

    for line in lines {
        for s in line.spans {
            x0 = x0.min(s.x);
            x1 = x1.max(s.x + s.width);
            y0 = y0.min(s.y - s.font_size * 0.2);
            y1 = y1.max(s.y + s.font_size * 0.8);
            spans.push(RawSpan {
                text: s.text,
                font_size: Some(s.font_size),
                font_name: s.font_name,
            });
        }
    }

    SpanGroup {
        kind: GroupKind::Text,
        bbox: Rect::new(x0, y0, x1, y1),
        spans,
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Helper to get a string from a PDF dictionary, trimmed; empty strings
/// count as absent.
fn dict_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let raw = dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|v| v.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

/// Detect an image file extension from magic bytes.
fn sniff_image_ext(data: &[u8]) -> Option<&'static str> {
    if data.len() < 8 {
        return None;
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("jpg");
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("gif");
    }
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        return Some("tiff");
    }
    if data.starts_with(b"BM") {
        return Some("bmp");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("webp");
    }
    None
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; TL is not tracked
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
