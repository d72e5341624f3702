//! Image extraction and persistence.

use std::fs;
use std::path::Path;

use uuid::Uuid;

use super::{write_atomic, PageOutcome, SkippedPage};
use crate::backend::{ExtractedImage, LayoutBackend};
use crate::error::Result;
use crate::model::ImageRecord;

/// Result of image extraction over a whole document.
#[derive(Debug)]
pub struct ImageExtraction {
    /// One record per persisted image, in page order
    pub records: Vec<ImageRecord>,
    /// Pages whose image enumeration failed
    pub skipped: Vec<SkippedPage>,
}

/// Extract every embedded image and persist its raw bytes under
/// `{output_dir}/images/{stem}_p{page}_img{index}.{ext}`.
///
/// Payloads are written verbatim; no re-encoding or downscaling.
pub fn extract_images(
    backend: &dyn LayoutBackend,
    stem: &str,
    output_dir: &Path,
) -> Result<ImageExtraction> {
    let images_dir = output_dir.join("images");
    let mut dir_created = false;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for page in 1..=backend.page_count() {
        let outcome = match backend.page_images(page) {
            Ok(images) => PageOutcome::Extracted(images),
            Err(e) => PageOutcome::Skipped {
                reason: e.to_string(),
            },
        };

        let images = match outcome {
            PageOutcome::Extracted(images) => images,
            PageOutcome::Skipped { reason } => {
                skipped.push(SkippedPage { page, reason });
                continue;
            }
        };

        for (index, image) in images.into_iter().enumerate() {
            if !dir_created {
                fs::create_dir_all(&images_dir)?;
                dir_created = true;
            }

            let ExtractedImage {
                data,
                format,
                width,
                height,
            } = image;

            let filename = format!("{}_p{}_img{}.{}", stem, page, index + 1, format);
            let image_path = images_dir.join(filename);
            write_atomic(&image_path, &data)?;

            records.push(ImageRecord {
                image_id: Uuid::new_v4(),
                page,
                storage_path: image_path,
                format,
                width,
                height,
            });
        }
    }

    Ok(ImageExtraction { records, skipped })
}
