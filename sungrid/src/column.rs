//! Column descriptors and the visible-column set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Semantic type of a column, used for rendering and facet matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Currency,
    Date,
    Status,
    Percent,
    Tags,
    Customer,
    /// Synthetic leading row-number column. Never hideable or resizable.
    RowNumber,
    /// Trailing actions column. Newly added columns are inserted before it.
    Actions,
}

/// Column configuration.
///
/// Describes how one field is rendered and interacted with. Interactive
/// capabilities default off and are enabled builder-style:
///
/// ```ignore
/// let columns = vec![
///     Column::new("customer", "Customer", ColumnKind::Customer).sortable().filterable(),
///     Column::new("cost", "System Cost", ColumnKind::Currency).sortable().resizable(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique key within a table.
    pub key: String,
    /// Header label.
    pub label: String,
    /// Semantic type.
    pub kind: ColumnKind,
    pub sortable: bool,
    pub filterable: bool,
    pub resizable: bool,
    /// Non-hideable columns never appear in hide/resize affordances.
    pub hideable: bool,
    /// Minimum width in terminal cells.
    pub min_width: u16,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        let hideable = !matches!(kind, ColumnKind::RowNumber | ColumnKind::Actions);
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            sortable: false,
            filterable: false,
            resizable: false,
            hideable,
            min_width: 6,
        }
    }

    /// Synthetic row-number column.
    pub fn row_number() -> Self {
        let mut col = Self::new("__row", "#", ColumnKind::RowNumber);
        col.min_width = 4;
        col
    }

    /// Trailing actions column.
    pub fn actions() -> Self {
        Self::new("__actions", "Actions", ColumnKind::Actions)
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = width;
        self
    }
}

/// Ordered column descriptors plus hidden-column tracking.
///
/// Invariant: the rendered columns are always `all \ hidden`, in
/// descriptor order. Columns added at runtime land immediately before
/// the trailing actions column, if one exists.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
    hidden: HashSet<String>,
    /// Keys of columns merged in at runtime ("Add Column").
    custom: HashSet<String>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            hidden: HashSet::new(),
            custom: HashSet::new(),
        }
    }

    /// All descriptors in order, hidden included.
    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    /// Visible descriptors in descriptor order.
    pub fn visible(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !self.hidden.contains(&c.key))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Hide a column. Idempotent; refuses non-hideable columns.
    pub fn hide(&mut self, key: &str) {
        match self.get(key) {
            Some(col) if col.hideable => {
                self.hidden.insert(key.to_string());
            }
            Some(_) => log::warn!("refusing to hide pinned column {key}"),
            None => log::warn!("hide: unknown column {key}"),
        }
    }

    /// Unhide every column.
    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// Merge an extra descriptor into the active set.
    ///
    /// Inserted immediately before the trailing actions column when one
    /// exists, appended otherwise. A duplicate key replaces in place.
    pub fn add_column(&mut self, column: Column) {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.key == column.key) {
            *existing = column;
            return;
        }
        self.custom.insert(column.key.clone());
        let pos = self
            .columns
            .iter()
            .position(|c| c.kind == ColumnKind::Actions)
            .unwrap_or(self.columns.len());
        self.columns.insert(pos, column);
    }

    /// Remove all runtime-added columns.
    pub fn remove_custom(&mut self) {
        let custom = std::mem::take(&mut self.custom);
        self.columns.retain(|c| !custom.contains(&c.key));
        self.hidden.retain(|k| !custom.contains(k));
    }

    /// Replace the full descriptor set (e.g. headers arrived from the
    /// data source). Hidden/custom tracking for vanished keys is dropped.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.hidden.retain(|k| self.columns.iter().any(|c| &c.key == k));
        self.custom.retain(|k| self.columns.iter().any(|c| &c.key == k));
    }

    /// Restore a hidden-key list from a persisted snapshot.
    ///
    /// Unknown and non-hideable keys are discarded.
    pub(crate) fn restore_hidden(&mut self, keys: &[String]) {
        self.hidden.clear();
        for key in keys {
            match self.get(key) {
                Some(col) if col.hideable => {
                    self.hidden.insert(key.clone());
                }
                _ => log::warn!("discarding persisted hidden state for {key}"),
            }
        }
    }

    pub(crate) fn hidden_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.hidden.iter().cloned().collect();
        keys.sort();
        keys
    }
}
