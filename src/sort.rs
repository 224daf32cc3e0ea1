//! Multi-key sort engine.
//!
//! Produces an index view over row storage rather than reordering the rows:
//! storage order is the insertion order and stays fixed, which keeps row ids
//! and undo targets stable while the view re-sorts freely.

use std::cmp::Ordering;

use crate::types::{FieldKey, FieldValue, RowRecord, SortDirection, SortKey};

/// Natural ordering of two values of the same field.
///
/// Numbers compare numerically (`total_cmp`), everything else compares as
/// text. Mixed kinds cannot occur for a well-typed field and fall back to
/// equal.
fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        _ => match (a.as_text(), b.as_text()) {
            (Some(x), Some(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

/// Lexicographic comparison across the sort sequence in priority order.
///
/// Direction reverses the comparator result, not the operands, so tie-breaks
/// compose correctly under mixed ascending/descending sequences.
pub fn compare_rows(a: &RowRecord, b: &RowRecord, sort: &[SortKey]) -> Ordering {
    for key in sort {
        let ord = compare_values(&a.field(key.field), &b.field(key.field));
        let ord = match key.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Sorted view over `rows`: storage indices in display order.
///
/// The sort is stable, so ties keep their original relative order. An empty
/// sequence yields the identity view without any comparison work.
pub fn sorted_view(rows: &[RowRecord], sort: &[SortKey]) -> Vec<usize> {
    let mut view: Vec<usize> = (0..rows.len()).collect();
    if sort.is_empty() {
        return view;
    }
    view.sort_by(|&a, &b| match (rows.get(a), rows.get(b)) {
        (Some(ra), Some(rb)) => compare_rows(ra, rb, sort),
        _ => Ordering::Equal,
    });
    view
}

/// Advance a column through the sort cycle on a header click:
/// absent → ascending (appended, lowest priority) → descending (in place) →
/// removed (later entries shift up). A column already present updates in
/// place; it never moves to the end.
pub fn toggle(sort: &mut Vec<SortKey>, field: FieldKey) {
    let Some(pos) = sort.iter().position(|k| k.field == field) else {
        sort.push(SortKey {
            field,
            direction: SortDirection::Ascending,
        });
        return;
    };
    match sort.get(pos).map(|k| k.direction) {
        Some(SortDirection::Ascending) => {
            if let Some(entry) = sort.get_mut(pos) {
                entry.direction = SortDirection::Descending;
            }
        }
        _ => {
            sort.remove(pos);
        }
    }
}

/// Sort indicator for a column: its direction and tie-break priority
/// (0 = highest), or `None` when the column is unsorted.
pub fn indicator(sort: &[SortKey], field: FieldKey) -> Option<(SortDirection, usize)> {
    sort.iter()
        .position(|k| k.field == field)
        .and_then(|pos| sort.get(pos).map(|k| (k.direction, pos)))
}
