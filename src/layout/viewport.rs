//! Viewport state and window math.
//!
//! Rows have a fixed height, so the visible row range is plain arithmetic on
//! the scroll offset — O(1) per recompute. Column widths are non-uniform, so
//! the scrollable column window walks the partition's cumulative widths
//! instead. The asymmetry is deliberate: keep the hot vertical path cheap,
//! pay a linear scan only where widths force it.

use std::ops::Range;

use serde::Serialize;

use super::columns::ColumnBand;

/// Fixed height of every row band, in pixels.
pub const ROW_HEIGHT: f32 = 28.0;

/// Rows materialized beyond the strictly visible band on each side, to hide
/// blank frames during fast scroll and key repeat.
pub const OVERSCAN_ROWS: usize = 3;

/// Scroll position and container size of the visible area.
#[derive(Debug, Clone, Serialize)]
pub struct Viewport {
    /// Horizontal scroll within the scrollable column partition, in pixels.
    pub scroll_x: f32,
    /// Vertical scroll within the row track, in pixels.
    pub scroll_y: f32,
    /// Container width in pixels.
    pub width: f32,
    /// Container height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel offset to row index, floored. Callers clamp `px` non-negative first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px_to_row(px: f32) -> usize {
    (px / ROW_HEIGHT).floor().max(0.0) as usize
}

/// Number of row bands needed to cover `px` of height, rounded up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rows_to_cover(px: f32) -> usize {
    (px / ROW_HEIGHT).ceil().max(0.0) as usize
}

impl Viewport {
    /// Create a viewport with default dimensions and scroll at origin.
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    /// Half-open range of rows to materialize, overscan included.
    ///
    /// Everything outside this range exists only as reserved scroll-track
    /// space (see [`Viewport::spacer_height`]). Zero rows or a zero-height
    /// container produce an empty range.
    pub fn visible_row_range(&self, total_rows: usize) -> Range<usize> {
        if total_rows == 0 || self.height <= 0.0 {
            return 0..0;
        }
        let start = px_to_row(self.scroll_y)
            .saturating_sub(OVERSCAN_ROWS)
            .min(total_rows);
        let end = start
            .saturating_add(rows_to_cover(self.height))
            .saturating_add(2 * OVERSCAN_ROWS)
            .min(total_rows);
        start..end
    }

    /// Total height reserved on the scroll track for all rows.
    pub fn spacer_height(total_rows: usize) -> f32 {
        total_rows as f32 * ROW_HEIGHT
    }

    /// Rows that fit in the container, used as the Page Up/Down stride.
    pub fn rows_per_page(&self) -> usize {
        px_to_row(self.height).max(1)
    }

    /// Half-open index range of scrollable-partition columns to materialize.
    ///
    /// Walks the partition's cumulative widths: the first column whose
    /// trailing edge passes `scroll_x` opens the window, and it closes once
    /// the accumulated width passes the visible scrollable area
    /// (`width - pinned_width`). Pinned columns are not part of this range;
    /// they are always fully included by the caller.
    pub fn visible_scrollable_range(
        &self,
        bands: &[ColumnBand],
        pinned_width: f32,
    ) -> Range<usize> {
        let area = (self.width - pinned_width).max(0.0);
        if area <= 0.0 || bands.is_empty() {
            return 0..0;
        }

        let mut start = bands.len();
        let mut acc = 0.0;
        for (i, band) in bands.iter().enumerate() {
            acc += band.width;
            if acc > self.scroll_x {
                start = i;
                break;
            }
        }
        if start == bands.len() {
            // Scrolled past all content.
            return bands.len()..bands.len();
        }

        // `acc` is now the trailing edge of the start column.
        let limit = self.scroll_x + area;
        let mut end = bands.len();
        for (i, band) in bands.iter().enumerate().skip(start + 1) {
            if acc > limit {
                end = i;
                break;
            }
            acc += band.width;
        }
        start..end
    }

    /// Clamp scroll to the content bounds.
    ///
    /// Vertical range is `[0, total_height - height]`; horizontal range is
    /// `[0, scrollable_width - (width - pinned_width)]`, both floored at 0.
    pub fn clamp_scroll(&mut self, total_rows: usize, pinned_width: f32, scrollable_width: f32) {
        let max_y = (Self::spacer_height(total_rows) - self.height).max(0.0);
        let visible_area = (self.width - pinned_width).max(0.0);
        let max_x = (scrollable_width - visible_area).max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
    }

    /// Resize the container.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::FieldKey;

    fn bands(widths: &[f32]) -> Vec<ColumnBand> {
        let mut x = 0.0;
        widths
            .iter()
            .map(|&width| {
                let band = ColumnBand {
                    key: FieldKey::Email,
                    x,
                    width,
                };
                x += width;
                band
            })
            .collect()
    }

    #[test]
    fn test_row_range_at_origin() {
        let vp = Viewport::new();
        let range = vp.visible_row_range(10_000);
        assert_eq!(range.start, 0);
        // ceil(600 / 28) = 22 visible + 2 * overscan.
        assert_eq!(range.end, 22 + 2 * OVERSCAN_ROWS);
    }

    #[test]
    fn test_row_range_mid_scroll_has_overscan_both_sides() {
        let mut vp = Viewport::new();
        vp.scroll_y = 100.0 * ROW_HEIGHT;
        let range = vp.visible_row_range(10_000);
        assert_eq!(range.start, 100 - OVERSCAN_ROWS);
        assert_eq!(range.end, 100 - OVERSCAN_ROWS + 22 + 2 * OVERSCAN_ROWS);
    }

    #[test]
    fn test_row_range_clamps_to_total() {
        let mut vp = Viewport::new();
        vp.scroll_y = 1e9;
        let range = vp.visible_row_range(50);
        assert_eq!(range, 50..50);

        vp.scroll_y = 0.0;
        let range = vp.visible_row_range(5);
        assert_eq!(range, 0..5);
    }

    #[test]
    fn test_empty_dataset_and_zero_container() {
        let vp = Viewport::new();
        assert_eq!(vp.visible_row_range(0), 0..0);
        assert_eq!(Viewport::spacer_height(0), 0.0);

        let mut flat = Viewport::new();
        flat.resize(800.0, 0.0);
        assert_eq!(flat.visible_row_range(100), 0..0);
    }

    #[test]
    fn test_scrollable_window_walks_widths() {
        let vp = Viewport {
            scroll_x: 150.0,
            scroll_y: 0.0,
            width: 500.0,
            height: 600.0,
        };
        let bands = bands(&[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0]);
        // First trailing edge past 150 is column 1; area = 500, limit = 650,
        // so columns 1..=6 are needed (trailing edge 700 > 650 at col 6).
        let range = vp.visible_scrollable_range(&bands, 0.0);
        assert_eq!(range.start, 1);
        assert!(range.end >= 7, "window must cover the visible area");
    }

    #[test]
    fn test_scrollable_window_respects_pinned_width() {
        let vp = Viewport {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 300.0,
            height: 600.0,
        };
        let bands = bands(&[100.0; 10]);
        let range = vp.visible_scrollable_range(&bands, 200.0);
        // Only 100px of scrollable area: one column, plus at most one more.
        assert_eq!(range.start, 0);
        assert!(range.end <= 2);
    }

    #[test]
    fn test_scrollable_window_empty_when_no_area() {
        let vp = Viewport {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 100.0,
            height: 600.0,
        };
        let bands = bands(&[100.0; 4]);
        assert_eq!(vp.visible_scrollable_range(&bands, 150.0), 0..0);
        assert_eq!(vp.visible_scrollable_range(&[], 0.0), 0..0);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut vp = Viewport::new();
        vp.scroll_y = 1e9;
        vp.scroll_x = 1e9;
        vp.clamp_scroll(100, 200.0, 1000.0);
        assert_eq!(vp.scroll_y, 100.0 * ROW_HEIGHT - 600.0);
        assert_eq!(vp.scroll_x, 1000.0 - (800.0 - 200.0));

        vp.scroll_y = -50.0;
        vp.scroll_x = -50.0;
        vp.clamp_scroll(100, 200.0, 1000.0);
        assert_eq!(vp.scroll_y, 0.0);
        assert_eq!(vp.scroll_x, 0.0);
    }
}
