//! Column layout model: display order, pin/scroll partition, widths, offsets.
//!
//! The display order is one sequence over the column key set; pin and hide
//! status are independent of it. Partitioning is applied *after* order
//! resolution, so reordering a pinned column past scrollable ones only
//! changes its relative position within the pinned partition — it never
//! un-pins it. Hidden columns keep their slot in the order sequence, so
//! toggling visibility never reorders anything.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::{ColumnSpec, FieldKey, MIN_COL_WIDTH};

/// One visible column with its left offset *within its own partition*.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnBand {
    pub key: FieldKey,
    /// Cumulative sum of preceding visible widths in the same partition.
    pub x: f32,
    pub width: f32,
}

/// Mutable layout state for the column set.
///
/// Operations on keys that are not part of this grid's column set are silent
/// no-ops, never errors.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    /// Display order over the full key set, hidden columns included.
    order: Vec<FieldKey>,
    hidden: HashSet<FieldKey>,
    widths: HashMap<FieldKey, f32>,
    pinned: HashSet<FieldKey>,
}

impl ColumnLayout {
    /// Build the layout from column specs; spec order is the initial display order.
    pub fn new(specs: &[ColumnSpec]) -> Self {
        let order: Vec<FieldKey> = specs.iter().map(|s| s.key).collect();
        let widths = specs
            .iter()
            .map(|s| (s.key, s.width.max(MIN_COL_WIDTH)))
            .collect();
        let pinned = specs.iter().filter(|s| s.pinned).map(|s| s.key).collect();
        Self {
            order,
            hidden: HashSet::new(),
            widths,
            pinned,
        }
    }

    /// Current display order, hidden columns included.
    pub fn order(&self) -> &[FieldKey] {
        &self.order
    }

    pub fn is_hidden(&self, key: FieldKey) -> bool {
        self.hidden.contains(&key)
    }

    pub fn is_pinned(&self, key: FieldKey) -> bool {
        self.pinned.contains(&key)
    }

    /// Current width of a column, or the floor for unknown keys.
    pub fn width(&self, key: FieldKey) -> f32 {
        self.widths.get(&key).copied().unwrap_or(MIN_COL_WIDTH)
    }

    /// Grow or shrink a column by `delta` pixels, clamped at the width floor.
    ///
    /// Takes effect immediately; offset maps are derived on read, so there is
    /// no intermediate state where the width and the offsets disagree.
    pub fn resize(&mut self, key: FieldKey, delta: f32) {
        if let Some(w) = self.widths.get_mut(&key) {
            *w = (*w + delta).max(MIN_COL_WIDTH);
        }
    }

    /// Splice `source` out of the order and reinsert it at `target`'s
    /// pre-removal position. A backward drag lands the source immediately
    /// before the target; a forward drag lands it immediately after, since
    /// the removal shifts the target left by one. No-op when the keys are
    /// equal or either is unknown. Pin and hide status are untouched.
    pub fn reorder(&mut self, source: FieldKey, target: FieldKey) {
        if source == target {
            return;
        }
        let Some(from) = self.order.iter().position(|&k| k == source) else {
            return;
        };
        let Some(to) = self.order.iter().position(|&k| k == target) else {
            return;
        };
        self.order.remove(from);
        self.order.insert(to, source);
    }

    /// Flip a column's membership in the hidden set. Order is untouched, so
    /// re-showing a column restores its previous position.
    pub fn toggle_visibility(&mut self, key: FieldKey) {
        if !self.order.contains(&key) {
            return;
        }
        if !self.hidden.remove(&key) {
            self.hidden.insert(key);
        }
    }

    /// Visible keys in draw order: the pinned partition, then the scrollable one.
    pub fn visible_keys(&self) -> Vec<FieldKey> {
        let mut keys: Vec<FieldKey> = self.visible_in(true).collect();
        keys.extend(self.visible_in(false));
        keys
    }

    /// Number of visible columns across both partitions.
    pub fn visible_count(&self) -> usize {
        self.order.iter().filter(|k| !self.hidden.contains(k)).count()
    }

    /// Visible pinned columns with left offsets within the pinned partition.
    pub fn pinned_bands(&self) -> Vec<ColumnBand> {
        self.bands_in(true)
    }

    /// Visible scrollable columns with left offsets within the scrollable
    /// content area.
    pub fn scrollable_bands(&self) -> Vec<ColumnBand> {
        self.bands_in(false)
    }

    /// Total width of the visible pinned partition.
    pub fn pinned_width(&self) -> f32 {
        self.visible_in(true).map(|k| self.width(k)).sum()
    }

    /// Total content width of the visible scrollable partition.
    pub fn scrollable_width(&self) -> f32 {
        self.visible_in(false).map(|k| self.width(k)).sum()
    }

    fn visible_in(&self, pinned: bool) -> impl Iterator<Item = FieldKey> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |k| !self.hidden.contains(k) && self.pinned.contains(k) == pinned)
    }

    fn bands_in(&self, pinned: bool) -> Vec<ColumnBand> {
        let mut x = 0.0;
        self.visible_in(pinned)
            .map(|key| {
                let width = self.width(key);
                let band = ColumnBand { key, x, width };
                x += width;
                band
            })
            .collect()
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
    use crate::types::default_columns;

    fn layout() -> ColumnLayout {
        ColumnLayout::new(&default_columns())
    }

    #[test]
    fn test_initial_order_matches_specs() {
        let l = layout();
        assert_eq!(l.order(), &FieldKey::ALL);
        assert_eq!(l.visible_count(), FieldKey::ALL.len());
    }

    #[test]
    fn test_offsets_are_cumulative_within_partition() {
        let l = layout();
        let pinned = l.pinned_bands();
        assert_eq!(pinned[0].x, 0.0);
        assert_eq!(pinned[1].x, pinned[0].width);

        let scroll = l.scrollable_bands();
        assert_eq!(scroll[0].x, 0.0);
        assert_eq!(scroll[1].x, scroll[0].width);
    }

    #[test]
    fn test_resize_clamps_at_floor() {
        let mut l = layout();
        l.resize(FieldKey::Email, -10_000.0);
        assert_eq!(l.width(FieldKey::Email), MIN_COL_WIDTH);
        l.resize(FieldKey::Email, 40.0);
        assert_eq!(l.width(FieldKey::Email), MIN_COL_WIDTH + 40.0);
    }

    #[test]
    fn test_forward_reorder_lands_after_target() {
        let mut l = layout();
        l.reorder(FieldKey::Name, FieldKey::Department);
        let order = l.order();
        let name = order.iter().position(|&k| k == FieldKey::Name).unwrap();
        let dept = order.iter().position(|&k| k == FieldKey::Department).unwrap();
        assert_eq!(name, dept + 1, "forward drag takes the target's slot");
    }

    #[test]
    fn test_backward_reorder_lands_before_target() {
        let mut l = layout();
        l.reorder(FieldKey::Status, FieldKey::Email);
        let order = l.order();
        let status = order.iter().position(|&k| k == FieldKey::Status).unwrap();
        let email = order.iter().position(|&k| k == FieldKey::Email).unwrap();
        assert_eq!(status + 1, email);
    }

    #[test]
    fn test_reorder_self_is_noop() {
        let mut l = layout();
        let before = l.order().to_vec();
        l.reorder(FieldKey::Email, FieldKey::Email);
        assert_eq!(l.order(), &before[..]);
    }

    #[test]
    fn test_reorder_keeps_pinned_partition() {
        let mut l = layout();
        // Drag the pinned Name column past scrollable columns.
        l.reorder(FieldKey::Name, FieldKey::StartDate);
        assert!(l.is_pinned(FieldKey::Name));
        // Still drawn in the pinned partition.
        assert!(l.pinned_bands().iter().any(|b| b.key == FieldKey::Name));
        assert!(!l.scrollable_bands().iter().any(|b| b.key == FieldKey::Name));
    }

    #[test]
    fn test_hide_skips_column_but_keeps_order() {
        let mut l = layout();
        let before = l.order().to_vec();
        l.toggle_visibility(FieldKey::Department);
        assert_eq!(l.order(), &before[..], "hiding must not reorder");
        assert!(!l.visible_keys().contains(&FieldKey::Department));
        assert_eq!(l.visible_count(), FieldKey::ALL.len() - 1);

        // Offsets close the gap left by the hidden column.
        let scroll = l.scrollable_bands();
        let email = scroll.iter().find(|b| b.key == FieldKey::Email).unwrap();
        let salary = scroll.iter().find(|b| b.key == FieldKey::Salary).unwrap();
        assert_eq!(salary.x, email.x + email.width);

        l.toggle_visibility(FieldKey::Department);
        assert_eq!(l.order(), &before[..]);
        assert_eq!(l.visible_count(), FieldKey::ALL.len());
    }

    #[test]
    fn test_partition_widths() {
        let l = layout();
        assert_eq!(l.pinned_width(), 70.0 + 160.0);
        let scroll_total: f32 = l.scrollable_bands().iter().map(|b| b.width).sum();
        assert_eq!(l.scrollable_width(), scroll_total);
    }
}
