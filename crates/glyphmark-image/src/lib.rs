// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphmark-image — Font atlas processing for Glyphmark.
//
// Scans an atlas for pixel columns carrying green content and paints them
// with the marker color, then encodes the result.

pub mod marker;
pub mod processor;

// Re-export the primary entry points so callers can use `glyphmark_image::mark_file` etc.
pub use marker::{MarkablePixel, apply_marks, mark, mark_dynamic, scan_columns, scan_dynamic};
pub use processor::{ImageProcessor, mark_file, scan_file};
