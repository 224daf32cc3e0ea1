//! The grid engine facade.
//!
//! [`GridView`] owns every piece of shared mutable state — rows, column
//! layout, sort sequence, viewport, edit session, undo stack, focus, drag —
//! and exposes the event-shaped inputs the presentation layer feeds it plus
//! the derived [`RenderPlan`] it consumes. The model is single-threaded and
//! event-driven: derived state is recomputed synchronously from committed
//! state on every input, and the only asynchronous suspension point is field
//! validation, which re-enters through [`GridView::resolve_validation`].

pub mod events;
pub(crate) mod scroll;

use std::collections::HashMap;

use serde::Serialize;

use crate::drag::DragState;
use crate::editor::{
    mutation, EditPhase, EditorState, Resolution, ResolveAction, SessionToken, ValidationOutcome,
    ValidationRequest,
};
use crate::error::{Result, VgridError};
use crate::layout::{ColumnBand, ColumnLayout, Viewport, ROW_HEIGHT};
use crate::sort;
use crate::types::{
    default_columns, Alignment, ColumnSpec, FieldKey, RowRecord, SortDirection, SortKey,
};
use crate::undo::{UndoEntry, UndoStack};

/// 2D cursor over the visible, sorted matrix. Both coordinates index the
/// current views (sorted rows, visible columns), not raw storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FocusPos {
    pub row: usize,
    pub col: usize,
}

/// The grid engine.
pub struct GridView {
    rows: Vec<RowRecord>,
    /// Row id → storage index, rebuilt on load. Storage never reorders, so
    /// the map stays valid across sorts.
    row_index: HashMap<u64, usize>,
    columns: Vec<ColumnSpec>,
    layout: ColumnLayout,
    viewport: Viewport,
    sort: Vec<SortKey>,
    /// Sorted view: display position → storage index.
    view: Vec<usize>,
    editor: EditorState,
    undo: UndoStack,
    focus: FocusPos,
    drag: DragState,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView {
    /// Create an empty grid with the standard employee column set.
    pub fn new() -> Self {
        Self::with_columns(default_columns())
    }

    /// Create an empty grid with a custom column set.
    pub fn with_columns(columns: Vec<ColumnSpec>) -> Self {
        let layout = ColumnLayout::new(&columns);
        Self {
            rows: Vec::new(),
            row_index: HashMap::new(),
            columns,
            layout,
            viewport: Viewport::new(),
            sort: Vec::new(),
            view: Vec::new(),
            editor: EditorState::new(),
            undo: UndoStack::new(),
            focus: FocusPos::default(),
            drag: DragState::Idle,
        }
    }

    /// Replace the dataset. Resets the sorted view, focus, undo log and any
    /// in-progress edit or drag; the sort sequence and column layout survive.
    pub fn load_rows(&mut self, rows: Vec<RowRecord>) -> Result<()> {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.id, i).is_some() {
                return Err(VgridError::DuplicateRowId(row.id));
            }
        }
        self.rows = rows;
        self.row_index = index;
        self.editor.cancel();
        self.undo.clear();
        self.drag.cancel();
        self.focus = FocusPos::default();
        self.rebuild_view();
        self.clamp_all();
        Ok(())
    }

    /// Load rows from a JSON array of records.
    pub fn load_rows_json(&mut self, json: &str) -> Result<()> {
        let rows: Vec<RowRecord> = serde_json::from_str(json)?;
        self.load_rows(rows)
    }

    // ---- Counts and lookups ----

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_column_count(&self) -> usize {
        self.layout.visible_count()
    }

    /// The row at a sorted-view position.
    pub fn row_at(&self, view_index: usize) -> Option<&RowRecord> {
        let storage = self.view.get(view_index).copied()?;
        self.rows.get(storage)
    }

    /// The row with a given id, wherever the view has put it.
    pub fn row_by_id(&self, id: u64) -> Option<&RowRecord> {
        let storage = self.row_index.get(&id).copied()?;
        self.rows.get(storage)
    }

    /// Visible column keys in draw order (pinned partition first).
    pub fn visible_columns(&self) -> Vec<FieldKey> {
        self.layout.visible_keys()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn sort_sequence(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn focus(&self) -> FocusPos {
        self.focus
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.depth()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty() && !self.editor.is_active()
    }

    fn spec(&self, key: FieldKey) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    // ---- Scroll and size inputs ----

    /// Set absolute scroll position (both axes), clamped to content bounds.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.viewport.scroll_x = x;
        self.viewport.scroll_y = y;
        self.clamp_all();
    }

    /// Scroll by deltas, clamped to content bounds.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.viewport.scroll_x += dx;
        self.viewport.scroll_y += dy;
        self.clamp_all();
    }

    /// Container resize from the host's resize observer.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.clamp_all();
    }

    // ---- Column inputs ----

    /// Header resize-handle drag: grow or shrink a column, clamped at the
    /// width floor. Unknown keys are no-ops.
    pub fn resize_column(&mut self, key: FieldKey, delta: f32) {
        self.layout.resize(key, delta);
        self.clamp_all();
    }

    /// Move `source` to `target`'s slot in the display order.
    pub fn reorder_column(&mut self, source: FieldKey, target: FieldKey) {
        self.layout.reorder(source, target);
    }

    /// Show or hide a column. Order is untouched; focus is re-clamped so it
    /// never dangles past the shrunk visible set.
    pub fn toggle_column(&mut self, key: FieldKey) {
        self.layout.toggle_visibility(key);
        self.clamp_all();
    }

    /// Header click: advance the column through the sort cycle
    /// (none → asc → desc → removed). Ignored for unsortable columns.
    pub fn toggle_sort(&mut self, field: FieldKey) {
        if !self.spec(field).is_some_and(|c| c.sortable) {
            return;
        }
        sort::toggle(&mut self.sort, field);
        self.rebuild_view();
    }

    /// Sort indicator for a header: direction and priority, if sorted.
    pub fn sort_indicator(&self, field: FieldKey) -> Option<(SortDirection, usize)> {
        sort::indicator(&self.sort, field)
    }

    // ---- Drag reorder inputs ----

    pub fn drag_start(&mut self, source: FieldKey) {
        self.drag.start(source);
    }

    pub fn drag_over(&mut self, target: FieldKey) {
        self.drag.hover(target);
    }

    /// Drop the dragged header. Applies the reorder when a distinct target is
    /// armed; always clears the gesture.
    pub fn drag_drop(&mut self) {
        if let Some((source, target)) = self.drag.complete() {
            self.layout.reorder(source, target);
        }
    }

    /// Abort the gesture (pointer left the grid, drag canceled).
    pub fn drag_end(&mut self) {
        self.drag.cancel();
    }

    // ---- Edit lifecycle ----

    /// Begin editing the cell at a sorted-view row and column key.
    ///
    /// No-op when the column is not editable, the row does not exist, or
    /// another cell is mid-edit. A session whose commit is still validating
    /// is superseded; its late outcome will be discarded as stale.
    pub fn begin_edit(&mut self, view_row: usize, field: FieldKey) -> bool {
        if !self.spec(field).is_some_and(|c| c.editable) {
            return false;
        }
        let Some(row) = self.row_at(view_row) else {
            return false;
        };
        let current = row.field(field).display();
        self.editor.begin(row.id, field, current)
    }

    /// Replace the draft text of the active session.
    pub fn update_draft(&mut self, text: &str) -> bool {
        self.editor.update_draft(text)
    }

    /// Commit the active draft: moves the session to `Validating` and returns
    /// the request the host must run through its validator. The grid stays
    /// scrollable and navigable while the outcome is pending.
    #[must_use]
    pub fn commit(&mut self) -> Option<ValidationRequest> {
        self.editor.commit()
    }

    /// Cancel the active session, discarding the draft and orphaning any
    /// in-flight validation. No data mutation, no undo entry.
    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Deliver a validation outcome for a previously issued request.
    ///
    /// A token that no longer matches the active session — canceled,
    /// superseded, or already resolved — is discarded without mutating data
    /// or surfacing an error. On success the row is mutated by id (the view
    /// may have re-sorted since the commit), an undo entry captures the
    /// pre-commit value, and the view is re-derived.
    pub fn resolve_validation(
        &mut self,
        token: SessionToken,
        outcome: &ValidationOutcome,
    ) -> Resolution {
        match self.editor.resolve(token, outcome) {
            ResolveAction::Stale => Resolution::Stale,
            ResolveAction::Error => Resolution::Rejected,
            ResolveAction::Commit { row_id, field, raw } => {
                let value = mutation::coerce(field, &raw);
                let Some(storage) = self.row_index.get(&row_id).copied() else {
                    // Row vanished between commit and resolve (dataset reload
                    // cancels sessions, so this is unreachable in practice).
                    return Resolution::Stale;
                };
                if let Some(previous) = mutation::apply_edit(&mut self.rows, storage, field, value)
                {
                    self.undo.push(UndoEntry {
                        row_id,
                        field,
                        previous,
                    });
                }
                self.rebuild_view();
                Resolution::Applied
            }
        }
    }

    /// Active edit session, if any.
    pub fn edit_session(&self) -> Option<&crate::editor::EditSession> {
        self.editor.session()
    }

    // ---- Undo ----

    /// Reverse the most recent committed edit.
    ///
    /// Writes the recorded previous value back into the row found by id,
    /// regardless of where the view has moved it. No-op on an empty stack or
    /// while an edit session is active; undos are not re-pushed (no redo).
    pub fn undo(&mut self) -> bool {
        if self.editor.is_active() {
            return false;
        }
        let Some(entry) = self.undo.pop() else {
            return false;
        };
        if let Some(storage) = self.row_index.get(&entry.row_id).copied() {
            let _ = mutation::apply_edit(&mut self.rows, storage, entry.field, entry.previous);
        }
        self.rebuild_view();
        true
    }

    // ---- Derived-state plumbing ----

    fn rebuild_view(&mut self) {
        self.view = sort::sorted_view(&self.rows, &self.sort);
        self.clamp_all();
    }

    /// Clamp scroll and focus against current content bounds. Called after
    /// every mutation that can change row count, column visibility, widths,
    /// or container size, so neither ever dangles.
    fn clamp_all(&mut self) {
        self.viewport.clamp_scroll(
            self.rows.len(),
            self.layout.pinned_width(),
            self.layout.scrollable_width(),
        );
        let rows = self.view.len();
        let cols = self.layout.visible_count();
        self.focus.row = self.focus.row.min(rows.saturating_sub(1));
        self.focus.col = self.focus.col.min(cols.saturating_sub(1));
    }

    pub(crate) fn set_focus(&mut self, focus: FocusPos) {
        self.focus = focus;
        self.clamp_all();
    }

    // ---- Render plan ----

    /// Derive the minimal material set for the presentation layer: the
    /// windowed row slice with absolute vertical offsets, the pinned and
    /// windowed-scrollable column headers with offsets within their
    /// partitions, per-cell focus/edit flags, sort indicators, and the undo
    /// and count summary.
    pub fn render_plan(&self) -> RenderPlan {
        let pinned_bands = self.layout.pinned_bands();
        let scrollable_bands = self.layout.scrollable_bands();
        let col_window = self
            .viewport
            .visible_scrollable_range(&scrollable_bands, self.layout.pinned_width());
        let row_window = self.viewport.visible_row_range(self.view.len());

        let visible_keys = self.layout.visible_keys();
        let windowed_scrollable = scrollable_bands
            .get(col_window.clone())
            .unwrap_or(&[])
            .to_vec();

        let pinned = pinned_bands
            .iter()
            .map(|b| self.header_for(b))
            .collect::<Vec<_>>();
        let scrollable = windowed_scrollable
            .iter()
            .map(|b| self.header_for(b))
            .collect::<Vec<_>>();

        let mut rows = Vec::with_capacity(row_window.len());
        for view_index in row_window {
            let Some(row) = self.row_at(view_index) else {
                continue;
            };
            let y = view_index as f32 * ROW_HEIGHT;
            let mut cells = Vec::with_capacity(pinned_bands.len() + windowed_scrollable.len());
            for band in pinned_bands.iter().chain(windowed_scrollable.iter()) {
                cells.push(self.cell_for(row, view_index, band.key, &visible_keys));
            }
            rows.push(RowSlice {
                view_index,
                row_id: row.id,
                y,
                cells,
            });
        }

        RenderPlan {
            total_rows: self.rows.len(),
            total_columns: self.layout.visible_count(),
            spacer_height: Viewport::spacer_height(self.view.len()),
            pinned_width: self.layout.pinned_width(),
            scrollable_width: self.layout.scrollable_width(),
            pinned,
            scrollable,
            rows,
            focus: self.focus,
            editing: self.editor.is_active(),
            undo_depth: self.undo.depth(),
            can_undo: self.can_undo(),
        }
    }

    /// Serialize the render plan as JSON for hosts across an FFI boundary.
    pub fn render_plan_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.render_plan())?)
    }

    fn header_for(&self, band: &ColumnBand) -> ColumnHeader {
        let (label, align) = self
            .spec(band.key)
            .map(|c| (c.label.clone(), c.align))
            .unwrap_or_else(|| (band.key.as_str().to_string(), Alignment::Left));
        ColumnHeader {
            key: band.key,
            label,
            x: band.x,
            width: band.width,
            align,
            sort: self
                .sort_indicator(band.key)
                .map(|(direction, priority)| SortIndicator {
                    direction,
                    priority,
                }),
            drag_source: self.drag.source() == Some(band.key),
            drag_target: self.drag.target() == Some(band.key),
        }
    }

    fn cell_for(
        &self,
        row: &RowRecord,
        view_index: usize,
        key: FieldKey,
        visible_keys: &[FieldKey],
    ) -> CellView {
        let session = self
            .editor
            .session()
            .filter(|s| s.row_id == row.id && s.field == key);
        let text = match session {
            Some(s) => s.draft.clone(),
            None => {
                let value = row.field(key);
                self.spec(key)
                    .map(|c| c.display(&value))
                    .unwrap_or_else(|| value.display())
            }
        };
        let visible_col = visible_keys.iter().position(|&k| k == key);
        CellView {
            key,
            text,
            align: self.spec(key).map(|c| c.align).unwrap_or_default(),
            editing: session.is_some(),
            validating: session.is_some_and(|s| s.phase == EditPhase::Validating),
            error: session.and_then(|s| s.error.clone()),
            focused: view_index == self.focus.row && visible_col == Some(self.focus.col),
        }
    }
}

/// Sort indicator state for one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortIndicator {
    pub direction: SortDirection,
    /// Tie-break priority, 0 = highest.
    pub priority: usize,
}

/// One visible column header with its offset within its partition.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub key: FieldKey,
    pub label: String,
    pub x: f32,
    pub width: f32,
    pub align: Alignment,
    pub sort: Option<SortIndicator>,
    pub drag_source: bool,
    pub drag_target: bool,
}

/// One materialized cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub key: FieldKey,
    /// Formatted display text, or the live draft when this cell is editing.
    pub text: String,
    pub align: Alignment,
    pub editing: bool,
    pub validating: bool,
    pub error: Option<String>,
    pub focused: bool,
}

/// One materialized row with its absolute vertical offset.
#[derive(Debug, Clone, Serialize)]
pub struct RowSlice {
    pub view_index: usize,
    pub row_id: u64,
    /// Absolute y offset on the scroll track.
    pub y: f32,
    /// Cells for the pinned partition followed by the windowed scrollable
    /// partition.
    pub cells: Vec<CellView>,
}

/// Everything the presentation layer needs for one paint.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Reserved scroll-track height for all rows.
    pub spacer_height: f32,
    pub pinned_width: f32,
    pub scrollable_width: f32,
    pub pinned: Vec<ColumnHeader>,
    pub scrollable: Vec<ColumnHeader>,
    pub rows: Vec<RowSlice>,
    pub focus: FocusPos,
    pub editing: bool,
    pub undo_depth: usize,
    pub can_undo: bool,
}
