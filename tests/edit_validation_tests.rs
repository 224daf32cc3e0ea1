//! Edit lifecycle and validation race tests
//!
//! The session state machine end to end: begin/draft/commit/resolve, inline
//! errors with retry, cancelation, and stale-result discards when a
//! validation outcome lands after its session was superseded.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use vgrid::{
    validate_field, EditPhase, EmployeeStatus, FieldKey, GridView, Resolution, RowRecord,
    ValidationOutcome,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn employee(id: u64, name: &str, salary: f64) -> RowRecord {
    RowRecord {
        id,
        name: name.to_string(),
        email: format!("{name}@example.com"),
        department: "Engineering".to_string(),
        salary,
        performance: 5.0,
        status: EmployeeStatus::Active,
        start_date: "2020-01-01".to_string(),
    }
}

fn grid() -> GridView {
    let mut grid = GridView::new();
    grid.load_rows(
        (0..10)
            .map(|i| employee(i + 1, &format!("Person {i}"), 50_000.0 + i as f64 * 1_000.0))
            .collect(),
    )
    .unwrap();
    grid.resize(2000.0, 600.0);
    grid
}

/// Run the built-in rules synchronously, the way a host with no remote
/// validation would.
fn commit_and_validate(grid: &mut GridView) -> Resolution {
    let req = grid.commit().unwrap();
    let outcome = validate_field(req.field, &req.raw);
    grid.resolve_validation(req.token, &outcome)
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_begin_captures_current_value_as_draft() {
    let mut grid = grid();
    assert!(grid.begin_edit(0, FieldKey::Salary));
    let session = grid.edit_session().unwrap();
    assert_eq!(session.draft, "50000");
    assert_eq!(session.phase, EditPhase::Editing);
    assert!(session.error.is_none());
}

#[test]
fn test_begin_rejected_for_readonly_column() {
    let mut grid = grid();
    assert!(!grid.begin_edit(0, FieldKey::Id));
    assert!(!grid.begin_edit(0, FieldKey::Status));
    assert!(grid.edit_session().is_none());
}

#[test]
fn test_begin_rejected_while_editing_another_cell() {
    let mut grid = grid();
    assert!(grid.begin_edit(0, FieldKey::Name));
    assert!(!grid.begin_edit(1, FieldKey::Email));
    assert_eq!(grid.edit_session().unwrap().field, FieldKey::Name);
}

#[test]
fn test_salary_walkthrough_error_retry_commit_undo() {
    let mut grid = GridView::new();
    grid.load_rows(vec![employee(1, "Solo", 50_000.0)]).unwrap();

    assert!(grid.begin_edit(0, FieldKey::Salary));
    assert!(grid.update_draft("-5"));
    assert_eq!(commit_and_validate(&mut grid), Resolution::Rejected);

    // Session stays editable with the error inline; no data changed.
    let session = grid.edit_session().unwrap();
    assert_eq!(session.phase, EditPhase::Editing);
    assert_eq!(session.error.as_deref(), Some("Salary must be a positive number"));
    assert_eq!(grid.row_by_id(1).unwrap().salary, 50_000.0);
    assert_eq!(grid.undo_depth(), 0);

    // Correct and retry.
    assert!(grid.update_draft("60000"));
    assert_eq!(commit_and_validate(&mut grid), Resolution::Applied);
    assert!(grid.edit_session().is_none());
    assert_eq!(grid.row_by_id(1).unwrap().salary, 60_000.0);
    assert_eq!(grid.undo_depth(), 1);

    // Undo restores the exact prior value.
    assert!(grid.undo());
    assert_eq!(grid.row_by_id(1).unwrap().salary, 50_000.0);
    assert_eq!(grid.undo_depth(), 0);
}

#[test]
fn test_cancel_discards_draft_without_mutation() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Name);
    grid.update_draft("Renamed");
    grid.cancel_edit();
    assert!(grid.edit_session().is_none());
    assert_eq!(grid.row_at(0).unwrap().name, "Person 0");
    assert_eq!(grid.undo_depth(), 0);
}

#[test]
fn test_text_commit_stores_raw_text() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Email);
    grid.update_draft("new@company.com");
    assert_eq!(commit_and_validate(&mut grid), Resolution::Applied);
    assert_eq!(grid.row_at(0).unwrap().email, "new@company.com");
}

// =============================================================================
// Staleness and races
// =============================================================================

#[test]
fn test_stale_result_after_supersede_mutates_nothing() {
    let mut grid = grid();

    // Start editing row 5's salary and commit; validation is now pending.
    grid.begin_edit(5, FieldKey::Salary);
    grid.update_draft("99999");
    let pending = grid.commit().unwrap();
    let row5_id = grid.row_at(5).unwrap().id;
    let row5_salary = grid.row_by_id(row5_id).unwrap().salary;

    // Before it resolves, begin editing a different cell.
    assert!(grid.begin_edit(2, FieldKey::Name));

    // The late result must be discarded: row 5 unchanged, no error on the
    // new session, regardless of the outcome.
    assert_eq!(
        grid.resolve_validation(pending.token, &ValidationOutcome::Valid),
        Resolution::Stale
    );
    assert_eq!(grid.row_by_id(row5_id).unwrap().salary, row5_salary);
    assert!(grid.edit_session().unwrap().error.is_none());
    assert_eq!(grid.edit_session().unwrap().field, FieldKey::Name);
    assert_eq!(grid.undo_depth(), 0);

    // Same discard for a late *invalid* outcome.
    grid.cancel_edit();
    grid.begin_edit(5, FieldKey::Salary);
    let pending2 = grid.commit().unwrap();
    grid.begin_edit(2, FieldKey::Name);
    assert_eq!(
        grid.resolve_validation(pending2.token, &ValidationOutcome::Invalid("late".into())),
        Resolution::Stale
    );
    assert!(grid.edit_session().unwrap().error.is_none());
}

#[test]
fn test_stale_result_after_cancel() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("70000");
    let pending = grid.commit().unwrap();
    grid.cancel_edit();

    assert_eq!(
        grid.resolve_validation(pending.token, &ValidationOutcome::Valid),
        Resolution::Stale
    );
    assert_eq!(grid.row_at(0).unwrap().salary, 50_000.0);
    assert_eq!(grid.undo_depth(), 0);
}

#[test]
fn test_resolved_token_cannot_be_replayed() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("70000");
    let req = grid.commit().unwrap();
    assert_eq!(
        grid.resolve_validation(req.token, &ValidationOutcome::Valid),
        Resolution::Applied
    );
    assert_eq!(
        grid.resolve_validation(req.token, &ValidationOutcome::Valid),
        Resolution::Stale,
        "a resolved token is dead"
    );
    assert_eq!(grid.undo_depth(), 1);
}

#[test]
fn test_grid_stays_navigable_while_validating() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("70000");
    let pending = grid.commit().unwrap();

    // Scrolling and sorting still work while the outcome is pending.
    grid.set_scroll(0.0, 100.0);
    assert_eq!(grid.viewport().scroll_y, 100.0);
    grid.toggle_sort(FieldKey::Salary);
    grid.toggle_sort(FieldKey::Salary); // descending: row ids reorder

    // The commit still lands on the right row, found by id.
    let edited_id = grid.edit_session().unwrap().row_id;
    assert_eq!(
        grid.resolve_validation(pending.token, &ValidationOutcome::Valid),
        Resolution::Applied
    );
    assert_eq!(grid.row_by_id(edited_id).unwrap().salary, 70_000.0);
}

#[test]
fn test_commit_targets_row_id_not_view_position() {
    let mut grid = grid();
    // Sort descending by salary so view order is the reverse of storage.
    grid.toggle_sort(FieldKey::Salary);
    grid.toggle_sort(FieldKey::Salary);

    // Edit the top row of the view (highest salary, storage id 10).
    let top_id = grid.row_at(0).unwrap().id;
    assert_eq!(top_id, 10);
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("1000");
    let pending = grid.commit().unwrap();

    // Re-sorting while pending moves the row; the mutation still hits id 10.
    grid.toggle_sort(FieldKey::Salary); // removed: back to insertion order
    assert_eq!(
        grid.resolve_validation(pending.token, &ValidationOutcome::Valid),
        Resolution::Applied
    );
    assert_eq!(grid.row_by_id(10).unwrap().salary, 1_000.0);
    assert_eq!(grid.row_by_id(1).unwrap().salary, 50_000.0);
}

// =============================================================================
// Draft rendering
// =============================================================================

#[test]
fn test_plan_shows_draft_and_error_flags() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("-5");
    assert_eq!(commit_and_validate(&mut grid), Resolution::Rejected);

    let plan = grid.render_plan();
    let row = plan.rows.iter().find(|r| r.view_index == 0).unwrap();
    let cell = row.cells.iter().find(|c| c.key == FieldKey::Salary).unwrap();
    assert!(cell.editing);
    assert!(!cell.validating);
    assert_eq!(cell.text, "-5");
    assert_eq!(cell.error.as_deref(), Some("Salary must be a positive number"));
    assert!(plan.editing);
}

#[test]
fn test_plan_flags_validating_cell() {
    let mut grid = grid();
    grid.begin_edit(0, FieldKey::Salary);
    grid.update_draft("70000");
    let _pending = grid.commit().unwrap();

    let plan = grid.render_plan();
    let row = plan.rows.iter().find(|r| r.view_index == 0).unwrap();
    let cell = row.cells.iter().find(|c| c.key == FieldKey::Salary).unwrap();
    assert!(cell.editing);
    assert!(cell.validating);
}
