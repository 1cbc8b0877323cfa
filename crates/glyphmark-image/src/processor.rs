// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode an atlas, mark its glyph separator columns, and
// encode the result. Operates on in-memory images using the `image` crate.

use std::borrow::Cow;
use std::path::Path;

use glyphmark_core::MarkReport;
use glyphmark_core::error::{GlyphmarkError, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, info, instrument};

use crate::marker;

/// Marking pipeline operating on a single in-memory image.
///
/// ```ignore
/// let (marked, report) = ImageProcessor::open("img_font.png")?.mark_columns();
/// marked.save("font.png")?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The format is sniffed from the file contents, falling back to the
    /// extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| GlyphmarkError::decode(path, err))?
            .decode()
            .map_err(|err| GlyphmarkError::decode(path, err))?;
        info!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (PNG, BMP, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| GlyphmarkError::decode("<memory>", err))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Paint every column that contains green with the marker color.
    pub fn mark_columns(self) -> (Self, MarkReport) {
        let (image, report) = marker::mark_dynamic(self.image);
        (Self { image }, report)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        encodable_for(&self.image, Some(ImageFormat::Png))
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| GlyphmarkError::encode("<memory>", err))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    ///
    /// Float images are written at 16 bits per channel unless the target
    /// format stores floats (OpenEXR, Radiance HDR).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).ok();
        encodable_for(&self.image, format)
            .save(path)
            .map_err(|err| GlyphmarkError::encode(path, err))?;
        info!("Image saved");
        Ok(())
    }
}

/// Narrow float buffers to 16-bit when `format` cannot hold f32 channels.
fn encodable_for(image: &DynamicImage, format: Option<ImageFormat>) -> Cow<'_, DynamicImage> {
    if matches!(format, Some(ImageFormat::OpenExr | ImageFormat::Hdr)) {
        return Cow::Borrowed(image);
    }
    match image {
        DynamicImage::ImageRgb32F(_) => {
            debug!(?format, "Converting Rgb32F to Rgb16 for encoding");
            Cow::Owned(DynamicImage::ImageRgb16(image.to_rgb16()))
        }
        DynamicImage::ImageRgba32F(_) => {
            debug!(?format, "Converting Rgba32F to Rgba16 for encoding");
            Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
        }
        _ => Cow::Borrowed(image),
    }
}

/// Decode `input`, mark it, and write the marked image to `output`.
///
/// Nothing is written if decoding fails. The input file is never touched.
pub fn mark_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<MarkReport> {
    let (marked, report) = ImageProcessor::open(input)?.mark_columns();
    marked.save(output)?;
    Ok(report)
}

/// Decode `input` and report which columns would be marked.
pub fn scan_file(input: impl AsRef<Path>) -> Result<MarkReport> {
    let processor = ImageProcessor::open(input)?;
    let report = marker::scan_dynamic(processor.as_dynamic());
    info!(marked = report.marked_count(), "Columns scanned");
    Ok(report)
}
