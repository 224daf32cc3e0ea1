//! Typed coercion and row mutation for committed edits.

use crate::types::{EmployeeStatus, FieldKey, FieldValue, RowRecord};

/// Coerce validated raw text into the field's typed value.
///
/// Numeric fields parse (validation has already guaranteed they do), dates
/// and free text carry the raw string through. Only runs after a `Valid`
/// outcome, so the fallback arms are unreachable in practice.
pub(crate) fn coerce(field: FieldKey, raw: &str) -> FieldValue {
    match field {
        FieldKey::Id | FieldKey::Salary | FieldKey::Performance => {
            FieldValue::Number(raw.trim().parse().unwrap_or(0.0))
        }
        FieldKey::StartDate => FieldValue::Date(raw.to_string()),
        FieldKey::Status => EmployeeStatus::from_label(raw.trim())
            .map(FieldValue::Status)
            .unwrap_or_else(|| FieldValue::Text(raw.to_string())),
        FieldKey::Name | FieldKey::Email | FieldKey::Department => {
            FieldValue::Text(raw.to_string())
        }
    }
}

/// Write `value` into `field` of the row at `index`, returning the value it
/// replaced. `None` when the index is out of range.
pub(crate) fn apply_edit(
    rows: &mut [RowRecord],
    index: usize,
    field: FieldKey,
    value: FieldValue,
) -> Option<FieldValue> {
    let row = rows.get_mut(index)?;
    let previous = row.field(field);
    row.set_field(field, value);
    Some(previous)
}
