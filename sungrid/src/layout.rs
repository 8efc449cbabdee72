//! Column layout state: widths, text modes, resets, persistence form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::ColumnSet;
use crate::measure::{self, MAX_COL_CELLS, MIN_COL_CELLS};
use crate::row::Row;

/// Narrowest a column may be, as a percentage of table width.
pub const MIN_WIDTH_PCT: f32 = 5.0;

/// Widest a column may be, as a percentage of table width.
pub const MAX_WIDTH_PCT: f32 = 50.0;

/// How cell text that exceeds the column width is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextMode {
    /// Wrap onto additional lines.
    Wrap,
    /// Truncate with an ellipsis.
    Clip,
}

/// Named scopes for the reset action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Clear all layout customization, filters, and sort.
    Everything,
    /// Widths only.
    Columns,
    /// Wrap/clip settings only.
    TextMode,
    /// Unhide all columns.
    ShowAll,
    /// Remove runtime-added columns.
    CustomColumns,
    /// Clear search, facets, and sort (page-level state).
    Filters,
    /// Recompute widths from content.
    AutoFit,
}

impl ResetScope {
    pub const ALL: [ResetScope; 7] = [
        ResetScope::Everything,
        ResetScope::Columns,
        ResetScope::TextMode,
        ResetScope::ShowAll,
        ResetScope::CustomColumns,
        ResetScope::Filters,
        ResetScope::AutoFit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResetScope::Everything => "Reset everything",
            ResetScope::Columns => "Reset column widths",
            ResetScope::TextMode => "Reset wrap/clip",
            ResetScope::ShowAll => "Show all columns",
            ResetScope::CustomColumns => "Remove added columns",
            ResetScope::Filters => "Clear filters",
            ResetScope::AutoFit => "Auto-fit columns",
        }
    }
}

/// What a reset asks the owning page to do beyond layout state.
///
/// Filters and sort live at the page level, and auto-fit needs the
/// current dataset and viewport, so those come back as signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetEffect {
    pub clear_filters: bool,
    pub auto_fit: bool,
}

/// Serialized layout customization, persisted per table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub widths: HashMap<String, f32>,
    pub text_modes: HashMap<String, TextMode>,
    pub hidden: Vec<String>,
}

impl LayoutSnapshot {
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty() && self.text_modes.is_empty() && self.hidden.is_empty()
    }
}

/// Per-table layout customization state.
///
/// Widths are percentages of total table width. A column without an
/// explicit width gets an even share of the visible columns.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    widths: HashMap<String, f32>,
    text_modes: HashMap<String, TextMode>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's width, clamped to `[MIN_WIDTH_PCT, MAX_WIDTH_PCT]`.
    pub fn set_width(&mut self, key: &str, pct: f32) {
        self.widths
            .insert(key.to_string(), pct.clamp(MIN_WIDTH_PCT, MAX_WIDTH_PCT));
    }

    /// A column's width percentage; defaults to an even share.
    pub fn width_of(&self, key: &str, visible_count: usize) -> f32 {
        match self.widths.get(key) {
            Some(pct) => *pct,
            None if visible_count > 0 => 100.0 / visible_count as f32,
            None => 100.0,
        }
    }

    pub fn has_custom_width(&self, key: &str) -> bool {
        self.widths.contains_key(key)
    }

    /// Set or clear a column's text mode.
    pub fn set_text_mode(&mut self, key: &str, mode: Option<TextMode>) {
        match mode {
            Some(mode) => {
                self.text_modes.insert(key.to_string(), mode);
            }
            None => {
                self.text_modes.remove(key);
            }
        }
    }

    pub fn text_mode_of(&self, key: &str) -> Option<TextMode> {
        self.text_modes.get(key).copied()
    }

    /// Derive widths from content for every visible column.
    ///
    /// Measured content is clamped to `[MIN_COL_CELLS, MAX_COL_CELLS]`
    /// before converting to a percentage of `table_width`, which is then
    /// clamped to `[MIN_WIDTH_PCT, MAX_WIDTH_PCT]`. Content wider than
    /// the cell cap therefore lands exactly on the cap's percentage.
    pub fn auto_fit(&mut self, columns: &ColumnSet, rows: &[Row], table_width: u16) {
        if table_width == 0 {
            return;
        }
        for column in columns.visible() {
            let cells = measure::measure_column(column, rows).clamp(MIN_COL_CELLS, MAX_COL_CELLS);
            let pct = cells as f32 / table_width as f32 * 100.0;
            self.set_width(&column.key, pct);
        }
    }

    /// Apply a named reset scope.
    pub fn reset(&mut self, scope: ResetScope, columns: &mut ColumnSet) -> ResetEffect {
        let mut effect = ResetEffect::default();
        match scope {
            ResetScope::Everything => {
                self.widths.clear();
                self.text_modes.clear();
                columns.show_all();
                columns.remove_custom();
                effect.clear_filters = true;
            }
            ResetScope::Columns => self.widths.clear(),
            ResetScope::TextMode => self.text_modes.clear(),
            ResetScope::ShowAll => columns.show_all(),
            ResetScope::CustomColumns => columns.remove_custom(),
            ResetScope::Filters => effect.clear_filters = true,
            ResetScope::AutoFit => effect.auto_fit = true,
        }
        effect
    }

    /// Capture the persisted form of this layout plus hidden columns.
    pub fn snapshot(&self, columns: &ColumnSet) -> LayoutSnapshot {
        LayoutSnapshot {
            widths: self.widths.clone(),
            text_modes: self.text_modes.clone(),
            hidden: columns.hidden_keys(),
        }
    }

    /// Rehydrate from a persisted snapshot.
    ///
    /// Entries referencing unknown columns are discarded and widths are
    /// re-clamped, so a malformed or stale snapshot degrades to defaults
    /// instead of erroring.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot, columns: &mut ColumnSet) {
        self.widths.clear();
        for (key, pct) in &snapshot.widths {
            if columns.get(key).is_some() {
                self.set_width(key, *pct);
            } else {
                log::warn!("discarding persisted width for unknown column {key}");
            }
        }

        self.text_modes.clear();
        for (key, mode) in &snapshot.text_modes {
            if columns.get(key).is_some() {
                self.text_modes.insert(key.clone(), *mode);
            } else {
                log::warn!("discarding persisted text mode for unknown column {key}");
            }
        }

        columns.restore_hidden(&snapshot.hidden);
    }
}
