//! Row records and field values.
//!
//! Rows are fixed, typed records rather than open key/value maps: every field
//! a column can reference is a named member of [`RowRecord`], and code that
//! touches a field matches exhaustively on [`FieldKey`]. A row's `id` is the
//! only stable identity — positions in a sorted view shift under the caller's
//! feet, ids never do.

use serde::{Deserialize, Serialize};

use super::column::FieldKey;

/// Employment status, ordered by display label when sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Contract,
    Remote,
}

impl EmployeeStatus {
    /// Display label for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Contract => "Contract",
            Self::Remote => "Remote",
        }
    }

    /// Parse a status from its display label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Active" => Some(Self::Active),
            "On Leave" => Some(Self::OnLeave),
            "Contract" => Some(Self::Contract),
            "Remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

/// A single field's value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Status(EmployeeStatus),
    /// ISO `YYYY-MM-DD` date string.
    Date(String),
}

impl FieldValue {
    /// Plain display string, before any column formatter is applied.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) | Self::Date(s) => s.clone(),
            Self::Number(n) => {
                if n.fract().abs() < f64::EPSILON {
                    format!("{n:.0}")
                } else {
                    format!("{n}")
                }
            }
            Self::Status(s) => s.as_str().to_string(),
        }
    }

    /// Borrowed text for comparison, `None` for numeric values.
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Date(s) => Some(s),
            Self::Status(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }
}

/// One record in the dataset.
///
/// `id` is assigned once and never reused or recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub salary: f64,
    pub performance: f64,
    pub status: EmployeeStatus,
    pub start_date: String,
}

impl RowRecord {
    /// Read the field addressed by `key`.
    pub fn field(&self, key: FieldKey) -> FieldValue {
        match key {
            FieldKey::Id => FieldValue::Number(self.id as f64),
            FieldKey::Name => FieldValue::Text(self.name.clone()),
            FieldKey::Email => FieldValue::Text(self.email.clone()),
            FieldKey::Department => FieldValue::Text(self.department.clone()),
            FieldKey::Salary => FieldValue::Number(self.salary),
            FieldKey::Performance => FieldValue::Number(self.performance),
            FieldKey::Status => FieldValue::Status(self.status),
            FieldKey::StartDate => FieldValue::Date(self.start_date.clone()),
        }
    }

    /// Write the field addressed by `key`.
    ///
    /// `Id` is immutable and mismatched value kinds are ignored rather than
    /// coerced — upstream typed coercion is responsible for matching kinds.
    pub fn set_field(&mut self, key: FieldKey, value: FieldValue) {
        match (key, value) {
            (FieldKey::Id, _) => {}
            (FieldKey::Name, FieldValue::Text(s)) => self.name = s,
            (FieldKey::Email, FieldValue::Text(s)) => self.email = s,
            (FieldKey::Department, FieldValue::Text(s)) => self.department = s,
            (FieldKey::Salary, FieldValue::Number(n)) => self.salary = n,
            (FieldKey::Performance, FieldValue::Number(n)) => self.performance = n,
            (FieldKey::Status, FieldValue::Status(s)) => self.status = s,
            (FieldKey::StartDate, FieldValue::Date(s) | FieldValue::Text(s)) => {
                self.start_date = s;
            }
            _ => {}
        }
    }
}
