//! Layout state: widths, text modes, resets, snapshot round-trips.

use sungrid::column::{Column, ColumnKind, ColumnSet};
use sungrid::layout::{
    LayoutSnapshot, LayoutState, ResetScope, TextMode, MAX_WIDTH_PCT, MIN_WIDTH_PCT,
};
use sungrid::row::Row;

fn columns() -> ColumnSet {
    ColumnSet::new(vec![
        Column::row_number(),
        Column::new("name", "Name", ColumnKind::Text).sortable(),
        Column::new("detail", "Detail", ColumnKind::Text),
        Column::new("cost", "Cost", ColumnKind::Currency).resizable(),
        Column::actions(),
    ])
}

#[test]
fn test_widths_clamp_to_bounds() {
    let mut layout = LayoutState::new();
    layout.set_width("name", 80.0);
    assert_eq!(layout.width_of("name", 5), MAX_WIDTH_PCT);

    layout.set_width("name", 1.0);
    assert_eq!(layout.width_of("name", 5), MIN_WIDTH_PCT);
}

#[test]
fn test_default_width_is_even_share_of_visible() {
    let layout = LayoutState::new();
    assert_eq!(layout.width_of("name", 4), 25.0);
    assert_eq!(layout.width_of("name", 5), 20.0);
}

#[test]
fn test_width_survives_snapshot_round_trip() {
    let mut columns = columns();
    let mut layout = LayoutState::new();
    layout.set_width("cost", 23.0);
    layout.set_text_mode("detail", Some(TextMode::Wrap));

    let snapshot = layout.snapshot(&columns);
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: LayoutSnapshot = serde_json::from_str(&json).unwrap();

    let mut restored = LayoutState::new();
    restored.restore(&decoded, &mut columns);
    assert_eq!(restored.width_of("cost", 5), 23.0);
    assert_eq!(restored.text_mode_of("detail"), Some(TextMode::Wrap));
}

#[test]
fn test_restore_discards_unknown_columns() {
    let mut columns = columns();
    let mut snapshot = LayoutSnapshot::default();
    snapshot.widths.insert("ghost".to_string(), 30.0);
    snapshot.widths.insert("name".to_string(), 15.0);
    snapshot.text_modes.insert("ghost".to_string(), TextMode::Clip);
    snapshot.hidden.push("ghost".to_string());
    snapshot.hidden.push("detail".to_string());

    let mut layout = LayoutState::new();
    layout.restore(&snapshot, &mut columns);

    assert!(!layout.has_custom_width("ghost"));
    assert_eq!(layout.width_of("name", 5), 15.0);
    assert_eq!(layout.text_mode_of("ghost"), None);
    assert!(columns.is_hidden("detail"));
    assert!(!columns.is_hidden("ghost"));
}

#[test]
fn test_restore_reclamps_tampered_widths() {
    let mut columns = columns();
    let mut snapshot = LayoutSnapshot::default();
    snapshot.widths.insert("name".to_string(), 400.0);

    let mut layout = LayoutState::new();
    layout.restore(&snapshot, &mut columns);
    assert_eq!(layout.width_of("name", 5), MAX_WIDTH_PCT);
}

#[test]
fn test_auto_fit_clamps_measured_content() {
    let mut columns = ColumnSet::new(vec![
        Column::new("short", "S", ColumnKind::Text),
        Column::new("long", "Long", ColumnKind::Text),
    ]);
    let rows = vec![Row::new("1")
        .field("short", "hi")
        .field("long", "x".repeat(120))];

    let mut layout = LayoutState::new();
    layout.auto_fit(&columns, &rows, 100);

    // Short content floors at 8 cells, long content caps at 40 cells.
    assert_eq!(layout.width_of("short", 2), 8.0);
    assert_eq!(layout.width_of("long", 2), 40.0);

    // Hidden columns are left untouched.
    columns.hide("short");
    let mut layout = LayoutState::new();
    layout.auto_fit(&columns, &rows, 100);
    assert!(!layout.has_custom_width("short"));
}

#[test]
fn test_reset_scopes_touch_only_their_state() {
    let mut columns = columns();
    let mut layout = LayoutState::new();
    layout.set_width("name", 30.0);
    layout.set_text_mode("detail", Some(TextMode::Clip));
    columns.hide("detail");

    let effect = layout.reset(ResetScope::Columns, &mut columns);
    assert!(!effect.clear_filters && !effect.auto_fit);
    assert!(!layout.has_custom_width("name"));
    assert_eq!(layout.text_mode_of("detail"), Some(TextMode::Clip));
    assert!(columns.is_hidden("detail"));

    let effect = layout.reset(ResetScope::TextMode, &mut columns);
    assert!(!effect.clear_filters);
    assert_eq!(layout.text_mode_of("detail"), None);
    assert!(columns.is_hidden("detail"));

    let effect = layout.reset(ResetScope::ShowAll, &mut columns);
    assert!(!effect.clear_filters);
    assert!(!columns.is_hidden("detail"));
}

#[test]
fn test_reset_everything_clears_layout_and_signals_filters() {
    let mut columns = columns();
    columns.add_column(Column::new("extra", "Extra", ColumnKind::Text));
    let mut layout = LayoutState::new();
    layout.set_width("name", 30.0);
    columns.hide("detail");

    let effect = layout.reset(ResetScope::Everything, &mut columns);
    assert!(effect.clear_filters);
    assert!(!layout.has_custom_width("name"));
    assert!(!columns.is_hidden("detail"));
    assert!(columns.get("extra").is_none());
    assert!(layout.snapshot(&columns).is_empty());
}

#[test]
fn test_reset_auto_fit_only_signals() {
    let mut columns = columns();
    let mut layout = LayoutState::new();
    layout.set_width("name", 30.0);

    let effect = layout.reset(ResetScope::AutoFit, &mut columns);
    assert!(effect.auto_fit);
    // Widths are recomputed by the caller against live data, not here.
    assert!(layout.has_custom_width("name"));
}
