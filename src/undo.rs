//! Bounded undo log for committed field edits.
//!
//! Entries record the value as it existed immediately before the commit and
//! target rows by id, so reversal works no matter how the view has re-sorted
//! since. Undoing is single-level per entry: undos are never pushed back, so
//! there is no redo.

use std::collections::VecDeque;

use crate::types::{FieldKey, FieldValue};

/// Entries kept before the oldest is dropped.
pub const UNDO_CAP: usize = 50;

/// One reversible field mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub row_id: u64,
    pub field: FieldKey,
    /// The value immediately before the commit this entry reverses.
    pub previous: FieldValue,
}

/// Bounded LIFO of undo entries.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: VecDeque<UndoEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, dropping the oldest once past [`UNDO_CAP`].
    pub fn push(&mut self, entry: UndoEntry) {
        if self.entries.len() >= UNDO_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn entry(row_id: u64) -> UndoEntry {
        UndoEntry {
            row_id,
            field: FieldKey::Salary,
            previous: FieldValue::Number(row_id as f64),
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = UndoStack::new();
        stack.push(entry(1));
        stack.push(entry(2));
        assert_eq!(stack.pop().unwrap().row_id, 2);
        assert_eq!(stack.pop().unwrap().row_id, 1);
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut stack = UndoStack::new();
        for i in 0..(UNDO_CAP as u64 + 10) {
            stack.push(entry(i));
        }
        assert_eq!(stack.depth(), UNDO_CAP);
        // Most recent is still on top; the first ten were dropped.
        assert_eq!(stack.pop().unwrap().row_id, UNDO_CAP as u64 + 9);
        let mut bottom = None;
        while let Some(e) = stack.pop() {
            bottom = Some(e);
        }
        assert_eq!(bottom.unwrap().row_id, 10);
    }
}
