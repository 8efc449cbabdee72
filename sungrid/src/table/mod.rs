//! Dual-pane synchronized table widget.
//!
//! A frozen header pane and a scrollable body pane rendered as two
//! regions whose horizontal offsets and column widths are kept in
//! lockstep. Split into state, events, and render.

mod events;
mod render;
mod state;

pub use events::{EventResult, TableEvent};
pub use render::render;
pub use state::{Table, TableId, TableStatus};
