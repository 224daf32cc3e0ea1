//! Keyboard event handling for `GridView`.
//!
//! Key names follow browser `KeyboardEvent.key` values, which is what hosts
//! forward. While an edit session is active the state machine owns the
//! keyboard: Enter commits, Escape cancels, and navigation keys are
//! swallowed; printable input reaches the draft through
//! [`GridView::update_draft`], not here.

use crate::editor::ValidationRequest;

use super::{FocusPos, GridView};

/// What the engine did with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Not a grid key; the host should handle it (e.g. printable input).
    Ignored,
    /// Consumed by navigation or the edit lifecycle.
    Handled,
    /// A commit was triggered; the host must run this validation and feed
    /// the outcome back through `resolve_validation`.
    Validate(ValidationRequest),
}

const NAV_KEYS: [&str; 8] = [
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "Home",
    "End",
    "PageUp",
    "PageDown",
];

impl GridView {
    /// Route a key event through the edit state machine or navigation.
    #[must_use]
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> KeyAction {
        if self.edit_session().is_some() {
            return self.handle_key_while_editing(key, ctrl);
        }
        match key {
            "ArrowUp" => self.move_focus(-1, 0),
            "ArrowDown" => self.move_focus(1, 0),
            "ArrowLeft" => self.move_focus(0, -1),
            "ArrowRight" => self.move_focus(0, 1),
            "Home" => self.focus_column_edge(false),
            "End" => self.focus_column_edge(true),
            "PageUp" => {
                let page = self.viewport().rows_per_page();
                self.move_focus_rows_signed(page, true)
            }
            "PageDown" => {
                let page = self.viewport().rows_per_page();
                self.move_focus_rows_signed(page, false)
            }
            "Enter" => {
                let focus = self.focus();
                if let Some(field) = self.visible_columns().get(focus.col).copied() {
                    let _ = self.begin_edit(focus.row, field);
                }
                KeyAction::Handled
            }
            "z" | "Z" if ctrl => {
                let _ = self.undo();
                KeyAction::Handled
            }
            _ => KeyAction::Ignored,
        }
    }

    fn handle_key_while_editing(&mut self, key: &str, ctrl: bool) -> KeyAction {
        match key {
            "Enter" => match self.commit() {
                Some(request) => KeyAction::Validate(request),
                // Already validating; swallow the repeat.
                None => KeyAction::Handled,
            },
            "Escape" => {
                self.cancel_edit();
                KeyAction::Handled
            }
            // The session owns the keyboard: navigation and undo are
            // suppressed until it ends.
            "z" | "Z" if ctrl => KeyAction::Handled,
            k if NAV_KEYS.contains(&k) => KeyAction::Handled,
            _ => KeyAction::Ignored,
        }
    }

    /// Move the cursor by one unit in each axis, clamped to the visible
    /// matrix, scrolling the target row into view on a row change.
    fn move_focus(&mut self, row_delta: isize, col_delta: isize) -> KeyAction {
        let rows = self.row_count();
        let cols = self.visible_column_count();
        if rows == 0 || cols == 0 {
            return KeyAction::Handled;
        }
        let current = self.focus();
        let row = step(current.row, row_delta, rows);
        let col = step(current.col, col_delta, cols);
        self.set_focus(FocusPos { row, col });
        if row != current.row {
            self.ensure_row_visible(row);
        }
        KeyAction::Handled
    }

    fn focus_column_edge(&mut self, last: bool) -> KeyAction {
        let cols = self.visible_column_count();
        if cols == 0 {
            return KeyAction::Handled;
        }
        let mut focus = self.focus();
        focus.col = if last { cols - 1 } else { 0 };
        self.set_focus(focus);
        KeyAction::Handled
    }

    fn move_focus_rows_signed(&mut self, stride: usize, up: bool) -> KeyAction {
        let rows = self.row_count();
        if rows == 0 {
            return KeyAction::Handled;
        }
        let current = self.focus();
        let row = if up {
            current.row.saturating_sub(stride)
        } else {
            current.row.saturating_add(stride).min(rows - 1)
        };
        self.set_focus(FocusPos {
            row,
            col: current.col,
        });
        if row != current.row {
            self.ensure_row_visible(row);
        }
        KeyAction::Handled
    }
}

/// Step an index by a small signed delta, clamping to `[0, count)`.
fn step(value: usize, delta: isize, count: usize) -> usize {
    let moved = if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta.unsigned_abs())
    };
    moved.min(count.saturating_sub(1))
}
