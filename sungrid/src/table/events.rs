//! Event handling for the Table widget.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::state::Table;

/// Cells scrolled per horizontal wheel notch.
const HORIZONTAL_SCROLL_AMOUNT: i16 = 4;

/// Rows scrolled per vertical wheel notch.
const VERTICAL_SCROLL_AMOUNT: i16 = 3;

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Widget events the owning page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The sort state changed; the page should re-run its pipeline.
    SortChanged { key: String, ascending: bool },
    /// Column widths changed mid-drag; the page may persist.
    LayoutChanged,
    /// A resize drag finished.
    ResizeFinished,
    /// A body row was clicked.
    RowActivated { id: String },
}

impl Table {
    /// Dispatch a mouse event against the last rendered geometry.
    pub fn on_mouse(&self, event: &MouseEvent) -> (EventResult, Option<TableEvent>) {
        let (header, body) = self.geometry();
        let x = event.column;
        let y = event.row;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if header.contains((x, y).into()) => {
                let rel_x = x - header.x;
                if let Some(key) = self.handle_at(rel_x) {
                    if self.begin_resize(&key, x) {
                        return (EventResult::Consumed, None);
                    }
                    return (EventResult::Ignored, None);
                }
                if let Some(key) = self.column_at(rel_x)
                    && let Some(sort) = self.toggle_sort(&key)
                    && let Some(sorted_key) = sort.key
                {
                    return (
                        EventResult::Consumed,
                        Some(TableEvent::SortChanged {
                            key: sorted_key,
                            ascending: sort.ascending,
                        }),
                    );
                }
                (EventResult::Ignored, None)
            }
            MouseEventKind::Down(MouseButton::Left) if body.contains((x, y).into()) => {
                match self.row_index_at(y - body.y) {
                    Some(id) => (EventResult::Consumed, Some(TableEvent::RowActivated { id })),
                    None => (EventResult::Ignored, None),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.is_resizing() => {
                if self.update_resize(x) {
                    (EventResult::Consumed, Some(TableEvent::LayoutChanged))
                } else {
                    (EventResult::Ignored, None)
                }
            }
            // Pointer-up anywhere ends an active drag.
            MouseEventKind::Up(MouseButton::Left) if self.is_resizing() => {
                self.end_resize();
                (EventResult::Consumed, Some(TableEvent::ResizeFinished))
            }
            MouseEventKind::Moved if header.contains((x, y).into()) => {
                self.set_hover(self.handle_at(x - header.x));
                (EventResult::Ignored, None)
            }
            MouseEventKind::Moved => {
                self.set_hover(None);
                (EventResult::Ignored, None)
            }
            MouseEventKind::ScrollDown if body.contains((x, y).into()) => {
                self.scroll_y_by(VERTICAL_SCROLL_AMOUNT);
                (EventResult::Consumed, None)
            }
            MouseEventKind::ScrollUp if body.contains((x, y).into()) => {
                self.scroll_y_by(-VERTICAL_SCROLL_AMOUNT);
                (EventResult::Consumed, None)
            }
            MouseEventKind::ScrollRight
                if header.contains((x, y).into()) || body.contains((x, y).into()) =>
            {
                self.scroll_x_by(HORIZONTAL_SCROLL_AMOUNT);
                (EventResult::Consumed, None)
            }
            MouseEventKind::ScrollLeft
                if header.contains((x, y).into()) || body.contains((x, y).into()) =>
            {
                self.scroll_x_by(-HORIZONTAL_SCROLL_AMOUNT);
                (EventResult::Consumed, None)
            }
            _ => (EventResult::Ignored, None),
        }
    }

    /// Resizable column whose trailing edge sits within one cell of the
    /// given header-relative x.
    pub(super) fn handle_at(&self, rel_x: u16) -> Option<String> {
        let content_x = rel_x as i32 + self.header_scroll_x() as i32;
        let mut edge = 0i32;
        for (column, width) in self.resolved_widths() {
            edge += width as i32;
            if (content_x - edge).abs() <= 1 {
                return column.resizable.then(|| column.key);
            }
        }
        None
    }

    /// Column containing the given header-relative x.
    pub(super) fn column_at(&self, rel_x: u16) -> Option<String> {
        let content_x = rel_x + self.header_scroll_x();
        let mut left = 0u16;
        for (column, width) in self.resolved_widths() {
            if content_x >= left && content_x < left + width {
                return Some(column.key);
            }
            left += width;
        }
        None
    }
}
