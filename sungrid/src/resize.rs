//! Interactive column resize.
//!
//! A drag on a column's trailing edge adjusts its width live. The state
//! machine is `Idle → Dragging` on pointer-down over a handle and back
//! to `Idle` on pointer-up anywhere (or widget teardown); there is no
//! other cancellation.

use crate::layout::{MAX_WIDTH_PCT, MIN_WIDTH_PCT};

/// How a drag distributes width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeStrategy {
    /// Only the dragged column changes, clamped to `[5%, 50%]`.
    #[default]
    Single,
    /// The delta moves between the dragged column and its immediate
    /// right neighbor; their combined width is preserved.
    Accordion,
}

/// Width assignments produced by a drag update.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeUpdate {
    pub column: String,
    pub width_pct: f32,
    /// Present only for accordion drags.
    pub neighbor: Option<(String, f32)>,
}

/// Bookkeeping captured at drag start.
///
/// Everything needed to compute widths from pointer movement is frozen
/// here, so mid-drag layout changes cannot skew the math.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub column: String,
    pub start_x: u16,
    /// Dragged column's width at drag start, in percent.
    pub start_pct: f32,
    /// Column minimum width in cells, the hard floor for Single drags.
    pub min_cells: u16,
    /// Total table width in cells at drag start.
    pub table_width: u16,
    /// Right neighbor and its starting percent, for Accordion drags.
    pub neighbor: Option<(String, f32)>,
}

impl ResizeDrag {
    /// Compute new widths for the current pointer position.
    pub fn update(&self, x: u16) -> ResizeUpdate {
        let delta = x as f32 - self.start_x as f32;
        match &self.neighbor {
            None => self.update_single(delta),
            Some((key, neighbor_pct)) => self.update_accordion(delta, key, *neighbor_pct),
        }
    }

    fn update_single(&self, delta: f32) -> ResizeUpdate {
        let start_cells = self.start_pct / 100.0 * self.table_width as f32;
        let new_cells = (start_cells + delta).max(self.min_cells as f32);
        let pct = (new_cells / self.table_width as f32 * 100.0)
            .clamp(MIN_WIDTH_PCT, MAX_WIDTH_PCT);
        ResizeUpdate {
            column: self.column.clone(),
            width_pct: pct,
            neighbor: None,
        }
    }

    fn update_accordion(&self, delta: f32, neighbor_key: &str, neighbor_start: f32) -> ResizeUpdate {
        let delta_pct = delta / self.table_width as f32 * 100.0;
        let total = self.start_pct + neighbor_start;

        let mut column_pct = (self.start_pct + delta_pct).max(MIN_WIDTH_PCT);
        let mut neighbor_pct = total - column_pct;
        if neighbor_pct < MIN_WIDTH_PCT {
            neighbor_pct = MIN_WIDTH_PCT;
            column_pct = total - MIN_WIDTH_PCT;
        }

        ResizeUpdate {
            column: self.column.clone(),
            width_pct: column_pct,
            neighbor: Some((neighbor_key.to_string(), neighbor_pct)),
        }
    }
}
