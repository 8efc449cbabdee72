//! Generic table engine for the helioboard dashboard.
//!
//! `sungrid` provides the pieces every data table in the dashboard is
//! built from: a pure filter/sort pipeline, a column layout manager with
//! a persistable snapshot form, interactive column resizing, a dual-pane
//! (frozen header + scrollable body) table widget, and a declarative
//! toast notification queue.

pub mod column;
pub mod layout;
pub mod measure;
pub mod pipeline;
pub mod resize;
pub mod row;
pub mod table;
pub mod text;
pub mod toast;

pub mod prelude {
    pub use crate::column::{Column, ColumnKind, ColumnSet};
    pub use crate::layout::{LayoutSnapshot, LayoutState, ResetScope, TextMode};
    pub use crate::pipeline::{DatePreset, DateRange, FilterState, SortState};
    pub use crate::resize::{ResizeDrag, ResizeStrategy};
    pub use crate::row::{CellValue, Row};
    pub use crate::table::{EventResult, Table, TableEvent, TableId, TableStatus};
    pub use crate::toast::{Toast, ToastLevel, ToastQueue};
}
