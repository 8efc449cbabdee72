//! Table widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use ratatui::layout::Rect;

use crate::column::{Column, ColumnSet};
use crate::layout::{LayoutSnapshot, LayoutState, ResetEffect, ResetScope, TextMode};
use crate::resize::{ResizeDrag, ResizeStrategy};
use crate::row::Row;
use crate::pipeline::SortState;

/// Unique identifier for a Table widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Load status of the table's dataset.
///
/// Render precedence when several could apply: loading beats error,
/// error beats empty data, and only then do rows paint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Internal state for the Table widget.
#[derive(Debug)]
pub(super) struct TableInner {
    /// Column descriptors plus hidden tracking.
    pub columns: ColumnSet,
    /// Width/text-mode customization.
    pub layout: LayoutState,
    /// Display rows (already filtered/sorted by the owning page).
    pub rows: Vec<Row>,
    /// Current sort state.
    pub sort: SortState,
    /// Dataset load status.
    pub status: TableStatus,
    /// Resize behavior for this table.
    pub strategy: ResizeStrategy,
    /// Header pane horizontal offset in cells.
    pub header_x: u16,
    /// Body pane horizontal offset in cells. Invariant: equal to
    /// `header_x` after every mutation (panes scroll in lockstep).
    pub body_x: u16,
    /// Body vertical offset in rows. The header never scrolls vertically.
    pub scroll_y: u16,
    /// Body viewport size in cells, set by the renderer.
    pub viewport_width: u16,
    pub viewport_height: u16,
    /// Header/body screen areas from the last render, for hit testing.
    pub header_area: Rect,
    pub body_area: Rect,
    /// Active resize drag, if any.
    pub drag: Option<ResizeDrag>,
    /// Column under the pointer (resize-handle hover highlight).
    pub hover: Option<String>,
    /// Rendered row slots `(y offset in body, height, row index)` from
    /// the last paint, for click hit testing with variable row heights.
    pub row_slots: Vec<(u16, u16, usize)>,
}

impl TableInner {
    fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            layout: LayoutState::new(),
            rows: Vec::new(),
            sort: SortState::default(),
            status: TableStatus::Idle,
            strategy: ResizeStrategy::Single,
            header_x: 0,
            body_x: 0,
            scroll_y: 0,
            viewport_width: 0,
            viewport_height: 0,
            header_area: Rect::default(),
            body_area: Rect::default(),
            drag: None,
            hover: None,
            row_slots: Vec::new(),
        }
    }

    /// Percent widths resolved to cells against the current viewport.
    ///
    /// Both panes read these same assignments, which is what keeps the
    /// column layout of header and body identical at all times.
    pub fn resolved_widths(&self) -> Vec<(Column, u16)> {
        let visible = self.columns.visible();
        let count = visible.len();
        visible
            .into_iter()
            .map(|c| {
                let pct = self.layout.width_of(&c.key, count);
                let cells = (pct / 100.0 * self.viewport_width as f32).round() as u16;
                (c.clone(), cells.max(c.min_width))
            })
            .collect()
    }

    pub fn total_width(&self) -> u16 {
        self.resolved_widths().iter().map(|(_, w)| *w).sum()
    }

    pub fn max_scroll_x(&self) -> u16 {
        self.total_width().saturating_sub(self.viewport_width)
    }

    pub fn max_scroll_y(&self) -> u16 {
        (self.rows.len() as u16).saturating_sub(self.viewport_height.max(1))
    }
}

/// A dual-pane data table.
///
/// Holds the column set, layout customization, the display rows, sort
/// state, and the scroll/drag bookkeeping shared by both panes. Cheap to
/// clone; clones share state.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    pub(super) inner: Arc<RwLock<TableInner>>,
    pub(super) dirty: Arc<AtomicBool>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(ColumnSet::new(columns)))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_strategy(self, strategy: ResizeStrategy) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.strategy = strategy;
        }
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Columns and layout
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.all().to_vec())
            .unwrap_or_default()
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.visible().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn set_columns(&self, columns: Vec<Column>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns.set_columns(columns);
            guard.header_x = 0;
            guard.body_x = 0;
            self.mark_dirty();
        }
    }

    pub fn add_column(&self, column: Column) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns.add_column(column);
            self.mark_dirty();
        }
    }

    pub fn hide_column(&self, key: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns.hide(key);
            self.mark_dirty();
        }
    }

    pub fn show_all_columns(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns.show_all();
            self.mark_dirty();
        }
    }

    pub fn set_text_mode(&self, key: &str, mode: Option<TextMode>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.layout.set_text_mode(key, mode);
            self.mark_dirty();
        }
    }

    pub fn text_mode(&self, key: &str) -> Option<TextMode> {
        self.inner.read().ok().and_then(|g| g.layout.text_mode_of(key))
    }

    pub fn set_width_pct(&self, key: &str, pct: f32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.layout.set_width(key, pct);
            self.mark_dirty();
        }
    }

    pub fn width_pct(&self, key: &str) -> f32 {
        self.inner
            .read()
            .map(|g| g.layout.width_of(key, g.columns.visible_count()))
            .unwrap_or(0.0)
    }

    /// Apply a reset scope. Returns the page-level follow-up signals.
    pub fn reset(&self, scope: ResetScope) -> ResetEffect {
        if let Ok(mut guard) = self.inner.write() {
            let TableInner { layout, columns, .. } = &mut *guard;
            let effect = layout.reset(scope, columns);
            if effect.clear_filters {
                guard.sort.clear();
            }
            self.mark_dirty();
            return effect;
        }
        ResetEffect::default()
    }

    /// Recompute widths from the current rows and viewport.
    pub fn auto_fit(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let table_width = guard.viewport_width;
            let TableInner {
                layout,
                columns,
                rows,
                ..
            } = &mut *guard;
            layout.auto_fit(columns, rows, table_width);
            self.mark_dirty();
        }
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        self.inner
            .read()
            .map(|g| g.layout.snapshot(&g.columns))
            .unwrap_or_default()
    }

    pub fn restore(&self, snapshot: &LayoutSnapshot) {
        if let Ok(mut guard) = self.inner.write() {
            let TableInner { layout, columns, .. } = &mut *guard;
            layout.restore(snapshot, columns);
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Rows and status
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Vec<Row> {
        self.inner.read().map(|g| g.rows.clone()).unwrap_or_default()
    }

    pub fn set_rows(&self, rows: Vec<Row>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            guard.status = TableStatus::Ready;
            let max = guard.max_scroll_y();
            if guard.scroll_y > max {
                guard.scroll_y = max;
            }
            self.mark_dirty();
        }
    }

    pub fn status(&self) -> TableStatus {
        self.inner
            .read()
            .map(|g| g.status.clone())
            .unwrap_or_default()
    }

    pub fn set_status(&self, status: TableStatus) {
        if let Ok(mut guard) = self.inner.write() {
            guard.status = status;
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> SortState {
        self.inner.read().map(|g| g.sort.clone()).unwrap_or_default()
    }

    /// Toggle sort for a column, honoring its `sortable` flag.
    /// Returns the new sort state when it changed.
    pub fn toggle_sort(&self, key: &str) -> Option<SortState> {
        if let Ok(mut guard) = self.inner.write()
            && guard.columns.get(key).is_some_and(|c| c.sortable)
        {
            guard.sort.toggle(key);
            self.mark_dirty();
            return Some(guard.sort.clone());
        }
        None
    }

    pub fn clear_sort(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort.clear();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    pub fn header_scroll_x(&self) -> u16 {
        self.inner.read().map(|g| g.header_x).unwrap_or(0)
    }

    pub fn body_scroll_x(&self) -> u16 {
        self.inner.read().map(|g| g.body_x).unwrap_or(0)
    }

    /// Scroll the header pane; the body mirrors in the same call.
    pub fn set_header_scroll_x(&self, x: u16) {
        if let Ok(mut guard) = self.inner.write() {
            let x = x.min(guard.max_scroll_x());
            if guard.header_x != x {
                guard.header_x = x;
                self.mark_dirty();
            }
            // Mirror only when the panes actually differ, so a mirrored
            // write can never re-trigger mirroring.
            if guard.body_x != guard.header_x {
                guard.body_x = guard.header_x;
                self.mark_dirty();
            }
        }
    }

    /// Scroll the body pane; the header mirrors in the same call.
    pub fn set_body_scroll_x(&self, x: u16) {
        if let Ok(mut guard) = self.inner.write() {
            let x = x.min(guard.max_scroll_x());
            if guard.body_x != x {
                guard.body_x = x;
                self.mark_dirty();
            }
            if guard.header_x != guard.body_x {
                guard.header_x = guard.body_x;
                self.mark_dirty();
            }
        }
    }

    /// Scroll both panes horizontally by a delta in cells.
    pub fn scroll_x_by(&self, delta: i16) {
        let current = self.body_scroll_x();
        let next = (current as i32 + delta as i32).max(0) as u16;
        self.set_body_scroll_x(next);
    }

    pub fn scroll_y(&self) -> u16 {
        self.inner.read().map(|g| g.scroll_y).unwrap_or(0)
    }

    /// Vertical scrolling is confined to the body pane.
    pub fn set_scroll_y(&self, y: u16) {
        if let Ok(mut guard) = self.inner.write() {
            let y = y.min(guard.max_scroll_y());
            if guard.scroll_y != y {
                guard.scroll_y = y;
                self.mark_dirty();
            }
        }
    }

    pub fn scroll_y_by(&self, delta: i16) {
        let current = self.scroll_y();
        let next = (current as i32 + delta as i32).max(0) as u16;
        self.set_scroll_y(next);
    }

    // -------------------------------------------------------------------------
    // Resize drag
    // -------------------------------------------------------------------------

    /// Begin a resize drag on a column's trailing edge.
    pub fn begin_resize(&self, key: &str, x: u16) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let resizable = guard.columns.get(key).is_some_and(|c| c.resizable);
            if !resizable || guard.viewport_width == 0 {
                return false;
            }
            let count = guard.columns.visible_count();
            let min_cells = guard.columns.get(key).map(|c| c.min_width).unwrap_or(0);
            let neighbor = match guard.strategy {
                ResizeStrategy::Single => None,
                ResizeStrategy::Accordion => {
                    let visible = guard.columns.visible();
                    visible
                        .iter()
                        .position(|c| c.key == key)
                        .and_then(|i| visible.get(i + 1))
                        .map(|c| (c.key.clone(), guard.layout.width_of(&c.key, count)))
                }
            };
            guard.drag = Some(ResizeDrag {
                column: key.to_string(),
                start_x: x,
                start_pct: guard.layout.width_of(key, count),
                min_cells,
                table_width: guard.viewport_width,
                neighbor,
            });
            guard.hover = Some(key.to_string());
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Apply a drag move, updating widths live.
    pub fn update_resize(&self, x: u16) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && let Some(drag) = guard.drag.clone()
        {
            let update = drag.update(x);
            guard.layout.set_width(&update.column, update.width_pct);
            if let Some((key, pct)) = &update.neighbor {
                guard.layout.set_width(key, *pct);
            }
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Finish the drag, clearing transient bookkeeping.
    pub fn end_resize(&self) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.drag.take().is_some()
        {
            guard.hover = None;
            self.mark_dirty();
            return true;
        }
        false
    }

    pub fn is_resizing(&self) -> bool {
        self.inner.read().map(|g| g.drag.is_some()).unwrap_or(false)
    }

    /// Column currently highlighted by a drag or handle hover.
    pub fn hover_column(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.hover.clone())
    }

    pub fn set_hover(&self, key: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            // While a resize is active only the dragged column highlights.
            if guard.drag.is_some() {
                return;
            }
            if guard.hover != key {
                guard.hover = key;
                self.mark_dirty();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Viewport and geometry (set by renderer)
    // -------------------------------------------------------------------------

    pub fn viewport_width(&self) -> u16 {
        self.inner.read().map(|g| g.viewport_width).unwrap_or(0)
    }

    pub(super) fn set_geometry(&self, header: Rect, body: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.header_area = header;
            guard.body_area = body;
            guard.viewport_width = body.width;
            guard.viewport_height = body.height;
            let max_x = guard.max_scroll_x();
            if guard.header_x > max_x {
                guard.header_x = max_x;
                guard.body_x = max_x;
            }
            let max_y = guard.max_scroll_y();
            if guard.scroll_y > max_y {
                guard.scroll_y = max_y;
            }
        }
    }

    pub(super) fn geometry(&self) -> (Rect, Rect) {
        self.inner
            .read()
            .map(|g| (g.header_area, g.body_area))
            .unwrap_or_default()
    }

    pub(super) fn set_row_slots(&self, slots: Vec<(u16, u16, usize)>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.row_slots = slots;
        }
    }

    /// Id of the row occupying the given body-relative y, per the last
    /// rendered slots.
    pub(super) fn row_index_at(&self, rel_y: u16) -> Option<String> {
        self.inner.read().ok().and_then(|g| {
            g.row_slots
                .iter()
                .find(|(y, height, _)| rel_y >= *y && rel_y < y + height)
                .and_then(|(_, _, index)| g.rows.get(*index))
                .map(|row| row.id.clone())
        })
    }

    /// Resolved `(column, cells)` assignments shared by both panes.
    pub fn resolved_widths(&self) -> Vec<(Column, u16)> {
        self.inner
            .read()
            .map(|g| g.resolved_widths())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
