//! Table widget state: scroll sync, sort gating, status transitions.

use sungrid::column::{Column, ColumnKind};
use sungrid::layout::ResetScope;
use sungrid::row::Row;
use sungrid::table::{Table, TableStatus};

fn sample_table() -> Table {
    Table::new(vec![
        Column::row_number(),
        Column::new("name", "Name", ColumnKind::Text).sortable(),
        Column::new("detail", "Detail", ColumnKind::Text),
        Column::new("cost", "Cost", ColumnKind::Currency).sortable().resizable(),
        Column::actions(),
    ])
}

#[test]
fn test_horizontal_panes_scroll_in_lockstep() {
    let table = sample_table();

    table.set_body_scroll_x(10);
    assert_eq!(table.body_scroll_x(), table.header_scroll_x());

    table.set_header_scroll_x(3);
    assert_eq!(table.body_scroll_x(), 3);
    assert_eq!(table.header_scroll_x(), 3);

    // Re-applying the current offset is a no-op, not a new round of
    // mirroring.
    table.clear_dirty();
    table.set_body_scroll_x(3);
    assert!(!table.is_dirty());
}

#[test]
fn test_horizontal_scroll_clamps_at_zero() {
    let table = sample_table();
    table.scroll_x_by(-5);
    assert_eq!(table.body_scroll_x(), 0);
    assert_eq!(table.header_scroll_x(), 0);
}

#[test]
fn test_vertical_scroll_is_clamped_to_rows() {
    let table = sample_table();
    table.set_rows(vec![
        Row::new("1").field("name", "Amy"),
        Row::new("2").field("name", "Bob"),
    ]);

    table.scroll_y_by(50);
    assert!(table.scroll_y() <= 2);
    table.scroll_y_by(-50);
    assert_eq!(table.scroll_y(), 0);
}

#[test]
fn test_toggle_sort_honors_sortable_flag() {
    let table = sample_table();

    assert!(table.toggle_sort("detail").is_none());
    assert!(table.sort().key.is_none());

    let sort = table.toggle_sort("name").unwrap();
    assert_eq!(sort.key.as_deref(), Some("name"));
    assert!(sort.ascending);

    let sort = table.toggle_sort("name").unwrap();
    assert!(!sort.ascending);

    let sort = table.toggle_sort("cost").unwrap();
    assert_eq!(sort.key.as_deref(), Some("cost"));
    assert!(sort.ascending);
}

#[test]
fn test_set_rows_marks_table_ready() {
    let table = sample_table();
    assert_eq!(table.status(), TableStatus::Idle);

    table.set_status(TableStatus::Loading);
    assert_eq!(table.status(), TableStatus::Loading);

    table.set_rows(vec![Row::new("1")]);
    assert_eq!(table.status(), TableStatus::Ready);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_error_status_survives_until_replaced() {
    let table = sample_table();
    table.set_status(TableStatus::Error("fetch failed".to_string()));
    assert_eq!(table.status(), TableStatus::Error("fetch failed".to_string()));
}

#[test]
fn test_snapshot_round_trip_through_json() {
    let table = sample_table();
    table.set_width_pct("cost", 23.0);
    table.hide_column("detail");

    let json = serde_json::to_string(&table.snapshot()).unwrap();
    let snapshot = serde_json::from_str(&json).unwrap();

    let restored = sample_table();
    restored.restore(&snapshot);
    assert_eq!(restored.width_pct("cost"), 23.0);
    assert_eq!(restored.visible_columns().len(), 4);
}

#[test]
fn test_clones_share_state() {
    let table = sample_table();
    let other = table.clone();
    assert_eq!(table.id(), other.id());

    other.set_width_pct("cost", 40.0);
    assert_eq!(table.width_pct("cost"), 40.0);
}

#[test]
fn test_resize_drag_lifecycle_without_viewport_is_rejected() {
    // The renderer has not run, so the viewport is zero-width and a
    // drag cannot produce meaningful percentages.
    let table = sample_table();
    assert!(!table.begin_resize("cost", 10));
    assert!(!table.is_resizing());
    assert!(!table.update_resize(20));
    assert!(!table.end_resize());
}

#[test]
fn test_added_column_lands_before_actions_and_resets_away() {
    let table = sample_table();
    table.add_column(Column::new("tags", "Tags", ColumnKind::Tags));

    let keys: Vec<String> = table.columns().iter().map(|c| c.key.clone()).collect();
    assert_eq!(keys, ["__row", "name", "detail", "cost", "tags", "__actions"]);

    table.reset(ResetScope::CustomColumns);
    assert!(table.columns().iter().all(|c| c.key != "tags"));
    assert_eq!(table.columns().len(), 5);
}

#[test]
fn test_hidden_columns_leave_the_visible_set() {
    let table = sample_table();
    table.hide_column("detail");
    assert_eq!(table.visible_columns().len(), 4);

    // Pinned columns refuse to hide.
    table.hide_column("__row");
    assert_eq!(table.visible_columns().len(), 4);

    table.show_all_columns();
    assert_eq!(table.visible_columns().len(), 5);
}
