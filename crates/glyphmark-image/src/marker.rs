// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Column marker — finds every pixel column with green content and paints it
// with the marker color. Scanning and painting are separate passes so that
// marking decisions only ever see the original pixels.

use glyphmark_core::{GREEN_CHANNEL, MARKER_RGBA, MarkReport};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, Rgba};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, info, instrument};

/// Pixel types the marker can test and paint.
pub trait MarkablePixel: Pixel {
    /// Whether the green channel is above the channel type's minimum.
    fn has_green(&self) -> bool;

    /// The marker color expressed in this pixel type.
    fn marker() -> Self;
}

macro_rules! impl_markable {
    ($($t:ty),*) => {$(
        impl MarkablePixel for Rgb<$t> {
            fn has_green(&self) -> bool {
                self.0[GREEN_CHANNEL] > <$t as Primitive>::DEFAULT_MIN_VALUE
            }

            fn marker() -> Self {
                let [r, g, b, _] = MARKER_RGBA;
                Rgb([to_depth(r), to_depth(g), to_depth(b)])
            }
        }

        impl MarkablePixel for Rgba<$t> {
            fn has_green(&self) -> bool {
                self.0[GREEN_CHANNEL] > <$t as Primitive>::DEFAULT_MIN_VALUE
            }

            fn marker() -> Self {
                Rgba(MARKER_RGBA.map(to_depth))
            }
        }
    )*};
}

impl_markable!(u8, u16, f32);

/// Map a marker channel (always 0 or 255) onto the full range of `T`.
fn to_depth<T: Primitive>(channel: u8) -> T {
    if channel == 0 {
        T::DEFAULT_MIN_VALUE
    } else {
        T::DEFAULT_MAX_VALUE
    }
}

/// First pass: record every column holding at least one pixel with green.
///
/// Each column is scanned top to bottom and abandoned at the first hit.
pub fn scan_columns<I, P>(image: &I) -> MarkReport
where
    I: GenericImageView<Pixel = P>,
    P: MarkablePixel,
{
    let (width, height) = image.dimensions();
    let mut report = MarkReport::new(width, height);
    for x in 0..width {
        if (0..height).any(|y| image.get_pixel(x, y).has_green()) {
            report.push(x);
        }
    }
    report
}

/// Second pass: paint every column in `report` with the marker color.
///
/// Adjacent marked columns are filled as one rectangle spanning the full
/// image height.
pub fn apply_marks<P: MarkablePixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    report: &MarkReport,
) {
    debug_assert_eq!(
        image.dimensions(),
        (report.width, report.height),
        "report was built for a different image"
    );
    let height = image.height();
    if height == 0 {
        return;
    }
    let color = P::marker();
    for span in report.spans() {
        debug!(%span, "Painting column span");
        let rect = Rect::at(span.start as i32, 0).of_size(span.len, height);
        draw_filled_rect_mut(image, rect, color);
    }
}

/// Scan `image`, then paint its marked columns in place.
pub fn mark<P: MarkablePixel>(image: &mut ImageBuffer<P, Vec<P::Subpixel>>) -> MarkReport {
    let report = scan_columns(&*image);
    apply_marks(image, &report);
    report
}

/// Mark any decoded image.
///
/// RGB and RGBA buffers are marked at their native depth. Other color types
/// (luma, luma with alpha) carry no separate green channel and are converted
/// to 8-bit RGBA first, so their luminance takes the place of green.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn mark_dynamic(image: DynamicImage) -> (DynamicImage, MarkReport) {
    let (image, report) = match image {
        DynamicImage::ImageRgb8(buf) => mark_buffer(buf, DynamicImage::ImageRgb8),
        DynamicImage::ImageRgba8(buf) => mark_buffer(buf, DynamicImage::ImageRgba8),
        DynamicImage::ImageRgb16(buf) => mark_buffer(buf, DynamicImage::ImageRgb16),
        DynamicImage::ImageRgba16(buf) => mark_buffer(buf, DynamicImage::ImageRgba16),
        DynamicImage::ImageRgb32F(buf) => mark_buffer(buf, DynamicImage::ImageRgb32F),
        DynamicImage::ImageRgba32F(buf) => mark_buffer(buf, DynamicImage::ImageRgba32F),
        other => {
            debug!(color = ?other.color(), "No green channel, converting to RGBA8");
            mark_buffer(other.to_rgba8(), DynamicImage::ImageRgba8)
        }
    };
    info!(
        marked = report.marked_count(),
        spans = report.spans().len(),
        "Columns marked"
    );
    (image, report)
}

/// Report which columns of any decoded image would be marked, without
/// painting. Color types are handled as in [`mark_dynamic`].
pub fn scan_dynamic(image: &DynamicImage) -> MarkReport {
    match image {
        DynamicImage::ImageRgb8(buf) => scan_columns(buf),
        DynamicImage::ImageRgba8(buf) => scan_columns(buf),
        DynamicImage::ImageRgb16(buf) => scan_columns(buf),
        DynamicImage::ImageRgba16(buf) => scan_columns(buf),
        DynamicImage::ImageRgb32F(buf) => scan_columns(buf),
        DynamicImage::ImageRgba32F(buf) => scan_columns(buf),
        other => scan_columns(&other.to_rgba8()),
    }
}

fn mark_buffer<P: MarkablePixel>(
    mut buf: ImageBuffer<P, Vec<P::Subpixel>>,
    wrap: fn(ImageBuffer<P, Vec<P::Subpixel>>) -> DynamicImage,
) -> (DynamicImage, MarkReport) {
    let report = mark(&mut buf);
    (wrap(buf), report)
}
