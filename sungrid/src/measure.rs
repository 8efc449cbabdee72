//! Content measurement for auto-fit.
//!
//! The terminal analog of measuring rendered text: widths come from
//! `unicode-width` at one cell per column of display width.

use unicode_width::UnicodeWidthStr;

use crate::column::Column;
use crate::row::Row;

/// Padding added around cell content, in cells.
pub const CELL_PADDING: u16 = 2;

/// Narrowest a column may auto-fit to, in cells.
pub const MIN_COL_CELLS: u16 = 8;

/// Widest a column may auto-fit to, in cells.
pub const MAX_COL_CELLS: u16 = 40;

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text) as u16
}

/// Measured width of a column: the widest of the header label and every
/// cell's display text, plus fixed padding. Not yet clamped.
pub fn measure_column(column: &Column, rows: &[Row]) -> u16 {
    let mut width = display_width(&column.label);
    for row in rows {
        width = width.max(display_width(&row.display(&column.key)));
    }
    width + CELL_PADDING
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnKind;

    #[test]
    fn test_measure_takes_widest_of_header_and_cells() {
        let col = Column::new("name", "Name", ColumnKind::Text);
        let rows = vec![
            Row::new("1").field("name", "Bob"),
            Row::new("2").field("name", "Bartholomew Higginbotham"),
        ];
        assert_eq!(
            measure_column(&col, &rows),
            display_width("Bartholomew Higginbotham") + CELL_PADDING
        );
    }

    #[test]
    fn test_empty_dataset_measures_header() {
        let col = Column::new("cost", "System Cost", ColumnKind::Currency);
        assert_eq!(measure_column(&col, &[]), display_width("System Cost") + CELL_PADDING);
    }
}
