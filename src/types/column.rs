//! Column definitions.

use serde::{Deserialize, Serialize};

use super::row::FieldValue;

/// Closed set of column identities.
///
/// Identity order (the order of the variants) is the creation order of the
/// columns; the mutable display order lives in the layout model and is a
/// separate sequence over the same keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Id,
    Name,
    Email,
    Department,
    Salary,
    Performance,
    Status,
    StartDate,
}

impl FieldKey {
    /// All keys in identity (creation) order.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Department,
        Self::Salary,
        Self::Performance,
        Self::Status,
        Self::StartDate,
    ];

    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Department => "department",
            Self::Salary => "salary",
            Self::Performance => "performance",
            Self::Status => "status",
            Self::StartDate => "start_date",
        }
    }
}

/// Horizontal cell text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Width floor for every column; resizes clamp here instead of failing.
pub const MIN_COL_WIDTH: f32 = 60.0;

/// Default width for a freshly created column.
pub const DEFAULT_COL_WIDTH: f32 = 140.0;

/// Static definition of one column.
///
/// `width` here is the initial width; the authoritative, user-resized width
/// is tracked by the layout model. `pinned` columns never scroll horizontally
/// and always draw before the scrollable partition.
#[derive(Clone)]
pub struct ColumnSpec {
    pub key: FieldKey,
    pub label: String,
    pub width: f32,
    pub pinned: bool,
    pub sortable: bool,
    pub editable: bool,
    pub align: Alignment,
    /// Optional pure display formatter; `None` falls back to
    /// [`FieldValue::display`].
    pub formatter: Option<fn(&FieldValue) -> String>,
}

impl ColumnSpec {
    /// Create a column with defaults: unpinned, sortable, editable, left-aligned.
    pub fn new(key: FieldKey, label: &str) -> Self {
        Self {
            key,
            label: label.to_string(),
            width: DEFAULT_COL_WIDTH,
            pinned: false,
            sortable: true,
            editable: true,
            align: Alignment::Left,
            formatter: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width.max(MIN_COL_WIDTH);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn formatter(mut self, f: fn(&FieldValue) -> String) -> Self {
        self.formatter = Some(f);
        self
    }

    /// Display string for a value in this column.
    pub fn display(&self, value: &FieldValue) -> String {
        match self.formatter {
            Some(f) => f(value),
            None => value.display(),
        }
    }
}

/// The standard employee-table column set.
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(FieldKey::Id, "ID")
            .width(70.0)
            .pinned()
            .read_only()
            .align(Alignment::Right),
        ColumnSpec::new(FieldKey::Name, "Name").width(160.0).pinned(),
        ColumnSpec::new(FieldKey::Email, "Email").width(220.0),
        ColumnSpec::new(FieldKey::Department, "Department").width(140.0),
        ColumnSpec::new(FieldKey::Salary, "Salary")
            .width(110.0)
            .align(Alignment::Right)
            .formatter(format_salary),
        ColumnSpec::new(FieldKey::Performance, "Performance")
            .width(120.0)
            .align(Alignment::Right)
            .formatter(format_score),
        ColumnSpec::new(FieldKey::Status, "Status").width(100.0).read_only(),
        ColumnSpec::new(FieldKey::StartDate, "Start Date").width(120.0),
    ]
}

/// `$52,500`-style formatting for salary cells.
fn format_salary(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => format!("${}", group_thousands(*n)),
        other => other.display(),
    }
}

/// One-decimal score, e.g. `8.4`.
fn format_score(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => format!("{n:.1}"),
        other => other.display(),
    }
}

/// Insert thousands separators into the integral rendering of `n`.
fn group_thousands(n: f64) -> String {
    let plain = format!("{:.0}", n.abs());
    let mut grouped = String::with_capacity(plain.len() + plain.len() / 3);
    let digits = plain.len();
    for (i, ch) in plain.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
