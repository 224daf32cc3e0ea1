//! vgrid - virtualized grid engine
//!
//! The windowing, layout, and interaction core of a large-table viewer:
//! - Row/column windowing with overscan: only what is on screen materializes
//! - Column model: display order, pinning, resizing, drag reorder, hiding
//! - Stable multi-key sort over an index view (row ids never move)
//! - Cell-edit lifecycle with asynchronous, cancelable validation
//! - Bounded undo log and a keyboard-driven focus cursor
//!
//! The crate is headless: a presentation layer feeds it scroll, pointer,
//! keyboard, and resize events, and consumes the derived [`RenderPlan`].
//!
//! # Usage
//!
//! ```
//! use vgrid::{validate_field, GridView, RowRecord, EmployeeStatus, FieldKey};
//!
//! let mut grid = GridView::new();
//! grid.load_rows(vec![RowRecord {
//!     id: 1,
//!     name: "Ada Lovelace".into(),
//!     email: "ada@example.com".into(),
//!     department: "Engineering".into(),
//!     salary: 50000.0,
//!     performance: 9.5,
//!     status: EmployeeStatus::Active,
//!     start_date: "2020-01-15".into(),
//! }]).unwrap();
//!
//! grid.begin_edit(0, FieldKey::Salary);
//! grid.update_draft("60000");
//! if let Some(req) = grid.commit() {
//!     let outcome = validate_field(req.field, &req.raw);
//!     grid.resolve_validation(req.token, &outcome);
//! }
//! assert_eq!(grid.row_by_id(1).unwrap().salary, 60000.0);
//! ```

pub mod drag;
pub mod editor;
pub mod error;
pub mod layout;
pub mod sort;
pub mod types;
pub mod undo;
pub mod viewer;

pub use drag::DragState;
pub use editor::{
    validate_field, EditPhase, EditSession, FieldRules, Resolution, SessionToken,
    ValidationOutcome, ValidationRequest, Validator,
};
pub use error::{Result, VgridError};
pub use layout::{ColumnBand, ColumnLayout, Viewport, OVERSCAN_ROWS, ROW_HEIGHT};
pub use types::*;
pub use undo::{UndoEntry, UndoStack, UNDO_CAP};
pub use viewer::events::KeyAction;
pub use viewer::{
    CellView, ColumnHeader, FocusPos, GridView, RenderPlan, RowSlice, SortIndicator,
};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
