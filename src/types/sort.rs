//! Sort state types.

use serde::{Deserialize, Serialize};

use super::column::FieldKey;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One entry of the active sort sequence.
///
/// The sequence is ordered: position is tie-break priority, so this is a list
/// of entries, never a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: FieldKey,
    pub direction: SortDirection,
}
