//! Column resize math.

use sungrid::layout::{MAX_WIDTH_PCT, MIN_WIDTH_PCT};
use sungrid::resize::ResizeDrag;

fn single_drag(start_pct: f32, table_width: u16) -> ResizeDrag {
    ResizeDrag {
        column: "cost".to_string(),
        start_x: 500,
        start_pct,
        min_cells: 8,
        table_width,
        neighbor: None,
    }
}

#[test]
fn test_single_drag_converts_cell_delta_to_percent() {
    // 20% of a 1000-cell table is 200 cells; +100 cells lands on 30%.
    let drag = single_drag(20.0, 1000);
    let update = drag.update(600);
    assert_eq!(update.column, "cost");
    assert_eq!(update.width_pct, 30.0);
    assert!(update.neighbor.is_none());
}

#[test]
fn test_single_drag_is_relative_to_frozen_start() {
    let drag = single_drag(20.0, 1000);
    // Moving back to the press position restores the starting width.
    assert_eq!(drag.update(500).width_pct, 20.0);
    // Updates are absolute from drag start, not cumulative.
    drag.update(700);
    assert_eq!(drag.update(550).width_pct, 25.0);
}

#[test]
fn test_single_drag_clamps_to_percent_bounds() {
    let drag = single_drag(20.0, 1000);
    assert_eq!(drag.update(100).width_pct, MIN_WIDTH_PCT);
    assert_eq!(drag.update(1400).width_pct, MAX_WIDTH_PCT);
}

#[test]
fn test_single_drag_respects_min_cells_on_narrow_tables() {
    // On a 100-cell table the 8-cell floor binds before the 5% clamp.
    let drag = single_drag(20.0, 100);
    let update = drag.update(400);
    assert_eq!(update.width_pct, 8.0);
}

#[test]
fn test_accordion_drag_preserves_pair_total() {
    let drag = ResizeDrag {
        column: "cost".to_string(),
        start_x: 500,
        start_pct: 20.0,
        min_cells: 8,
        table_width: 1000,
        neighbor: Some(("status".to_string(), 30.0)),
    };

    let update = drag.update(600);
    assert_eq!(update.width_pct, 30.0);
    assert_eq!(update.neighbor, Some(("status".to_string(), 20.0)));

    let update = drag.update(400);
    assert_eq!(update.width_pct, 10.0);
    assert_eq!(update.neighbor, Some(("status".to_string(), 40.0)));
}

#[test]
fn test_accordion_drag_floors_both_columns() {
    let drag = ResizeDrag {
        column: "cost".to_string(),
        start_x: 500,
        start_pct: 20.0,
        min_cells: 8,
        table_width: 1000,
        neighbor: Some(("status".to_string(), 30.0)),
    };

    // Pushing far right: the neighbor stops at the floor and the dragged
    // column absorbs the remainder of the pair total.
    let update = drag.update(1000);
    assert_eq!(update.width_pct, 45.0);
    assert_eq!(update.neighbor, Some(("status".to_string(), MIN_WIDTH_PCT)));

    // Pulling far left: the dragged column stops at the floor.
    let update = drag.update(0);
    assert_eq!(update.width_pct, MIN_WIDTH_PCT);
    assert_eq!(update.neighbor, Some(("status".to_string(), 45.0)));
}
