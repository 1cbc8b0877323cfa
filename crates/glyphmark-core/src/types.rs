// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Glyphmark.

use serde::{Deserialize, Serialize};

/// Overlay color painted over every marked column: opaque yellow.
///
/// Green is non-zero, so a painted column is marked again on re-application
/// with the same color.
pub const MARKER_RGBA: [u8; 4] = [255, 255, 0, 255];

/// Index of the green channel in RGB and RGBA pixels.
pub const GREEN_CHANNEL: usize = 1;

/// A maximal run of adjacent marked columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    /// First marked column.
    pub start: u32,
    /// Number of adjacent marked columns (always >= 1).
    pub len: u32,
}

impl ColumnSpan {
    /// One past the last column of the span.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

impl std::fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.len == 1 {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end())
        }
    }
}

/// Result of scanning an image: which columns carry green content.
///
/// Built from the unmodified image before any column is painted, so a
/// report always reflects the original pixel data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkReport {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Marked column indices, strictly ascending.
    columns: Vec<u32>,
}

impl MarkReport {
    /// Empty report for a `width` x `height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            columns: Vec::new(),
        }
    }

    /// Record column `x` as marked. Columns must be pushed in ascending order.
    pub fn push(&mut self, x: u32) {
        debug_assert!(x < self.width, "column {x} out of bounds");
        debug_assert!(
            self.columns.last().is_none_or(|&last| last < x),
            "columns must be pushed in ascending order"
        );
        self.columns.push(x);
    }

    /// Marked column indices in ascending order.
    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn is_marked(&self, x: u32) -> bool {
        self.columns.binary_search(&x).is_ok()
    }

    pub fn marked_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Group marked columns into maximal runs of adjacent columns.
    pub fn spans(&self) -> Vec<ColumnSpan> {
        let mut spans: Vec<ColumnSpan> = Vec::new();
        for &x in &self.columns {
            match spans.last_mut() {
                Some(span) if span.end() == x => span.len += 1,
                _ => spans.push(ColumnSpan { start: x, len: 1 }),
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(width: u32, columns: &[u32]) -> MarkReport {
        let mut report = MarkReport::new(width, 1);
        for &x in columns {
            report.push(x);
        }
        report
    }

    #[test]
    fn spans_group_adjacent_columns() {
        let report = report_with(20, &[0, 1, 2, 5, 9, 10]);
        assert_eq!(
            report.spans(),
            vec![
                ColumnSpan { start: 0, len: 3 },
                ColumnSpan { start: 5, len: 1 },
                ColumnSpan { start: 9, len: 2 },
            ]
        );
    }

    #[test]
    fn empty_report_has_no_spans() {
        let report = MarkReport::new(8, 8);
        assert!(report.is_empty());
        assert!(report.spans().is_empty());
        assert!(!report.is_marked(0));
    }

    #[test]
    fn is_marked_looks_up_columns() {
        let report = report_with(10, &[3, 7]);
        assert!(report.is_marked(3));
        assert!(report.is_marked(7));
        assert!(!report.is_marked(4));
        assert_eq!(report.marked_count(), 2);
    }

    #[test]
    fn span_display() {
        assert_eq!(ColumnSpan { start: 4, len: 1 }.to_string(), "4");
        assert_eq!(ColumnSpan { start: 4, len: 3 }.to_string(), "4..7");
    }
}
