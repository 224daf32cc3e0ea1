//! Scroll-follow logic for focus navigation.
//!
//! Navigation is the engine's only producer of programmatic scroll: after a
//! row-focus change, the target row's band is brought into the visible band
//! if it fell outside it. Everything else only clamps.

use crate::layout::ROW_HEIGHT;

use super::GridView;

impl GridView {
    /// Scroll just far enough that the row band at `view_row` is fully
    /// visible: top-aligned when it was above the window, bottom-aligned
    /// when below. No-op when already visible.
    pub(crate) fn ensure_row_visible(&mut self, view_row: usize) {
        let top = view_row as f32 * ROW_HEIGHT;
        let bottom = top + ROW_HEIGHT;
        let (scroll_x, scroll_y, height) = {
            let vp = self.viewport();
            (vp.scroll_x, vp.scroll_y, vp.height)
        };
        if top < scroll_y {
            self.set_scroll(scroll_x, top);
        } else if bottom > scroll_y + height {
            self.set_scroll(scroll_x, bottom - height);
        }
    }
}
