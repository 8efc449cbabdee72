//! Table widget rendering.
//!
//! The header paints as a fixed one-row pane and the body as a separate
//! scrollable pane below it. Both panes slice cells from the same
//! resolved width assignments, so their column layout cannot diverge.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::column::{Column, ColumnKind};
use crate::layout::TextMode;
use crate::measure::display_width;
use crate::row::Row;
use crate::text::{clip_text, skip_cells, wrap_text};

use super::state::{Table, TableStatus};

/// Cap on how tall a wrapped row may grow, in lines.
const MAX_WRAP_LINES: usize = 3;

/// Render a table widget into the given area.
pub fn render(frame: &mut Frame, table: &Table, area: Rect) {
    if area.width == 0 || area.height < 2 {
        return;
    }

    let header_area = Rect { height: 1, ..area };
    let body_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height - 1,
    };
    table.set_geometry(header_area, body_area);

    let widths = table.resolved_widths();
    let scroll_x = table.header_scroll_x();
    let hover = table.hover_column();

    let sort = table.sort();
    let buf = frame.buffer_mut();
    render_header(
        buf,
        header_area,
        &widths,
        scroll_x,
        sort.key.as_deref(),
        sort.ascending,
        hover.as_deref(),
    );

    // Precedence when several states hold: loading > error > empty > rows.
    match table.status() {
        TableStatus::Loading => {
            centered_message(buf, body_area, "Loading…");
            table.set_row_slots(Vec::new());
        }
        TableStatus::Error(message) => {
            centered_message_styled(
                buf,
                body_area,
                &message,
                Style::default().fg(Color::Red),
            );
            table.set_row_slots(Vec::new());
        }
        _ if table.is_empty() => {
            centered_message(buf, body_area, "No data to display");
            table.set_row_slots(Vec::new());
        }
        _ => {
            let slots = render_rows(buf, table, body_area, &widths, scroll_x, hover.as_deref());
            table.set_row_slots(slots);
        }
    }

    table.clear_dirty();
}

#[allow(clippy::too_many_arguments)]
fn render_header(
    buf: &mut Buffer,
    area: Rect,
    widths: &[(Column, u16)],
    scroll_x: u16,
    sort_key: Option<&str>,
    ascending: bool,
    hover: Option<&str>,
) {
    let base = Style::default().add_modifier(Modifier::BOLD);
    buf.set_style(area, base);

    let mut left = 0i32;
    for (column, width) in widths {
        let mut label = column.label.clone();
        if sort_key == Some(column.key.as_str()) {
            label.push_str(if ascending { " ▲" } else { " ▼" });
        }
        let style = if hover == Some(column.key.as_str()) {
            base.bg(Color::DarkGray)
        } else {
            base
        };
        draw_cell(buf, area, left, *width, scroll_x, &label, style);
        left += *width as i32;
    }
}

fn render_rows(
    buf: &mut Buffer,
    table: &Table,
    area: Rect,
    widths: &[(Column, u16)],
    scroll_x: u16,
    hover: Option<&str>,
) -> Vec<(u16, u16, usize)> {
    let rows = table.rows();
    let scroll_y = table.scroll_y() as usize;
    let mut slots = Vec::new();
    let mut y = 0u16;

    for (index, row) in rows.iter().enumerate().skip(scroll_y) {
        if y >= area.height {
            break;
        }

        // Shape every cell first; the row is as tall as its tallest cell.
        let cells: Vec<Vec<String>> = widths
            .iter()
            .map(|(column, width)| cell_lines(table, column, row, index, *width))
            .collect();
        let height = cells.iter().map(|lines| lines.len()).max().unwrap_or(1) as u16;
        let visible_height = height.min(area.height - y);

        for line in 0..visible_height {
            let mut left = 0i32;
            for ((column, width), lines) in widths.iter().zip(&cells) {
                let text = lines.get(line as usize).map(String::as_str).unwrap_or("");
                let style = if hover == Some(column.key.as_str()) {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let line_area = Rect {
                    y: area.y + y + line,
                    height: 1,
                    ..area
                };
                draw_cell(buf, line_area, left, *width, scroll_x, text, style);
                left += *width as i32;
            }
        }

        slots.push((y, visible_height, index));
        y += visible_height;
    }

    slots
}

/// Lines of text for one cell at the given column width.
fn cell_lines(table: &Table, column: &Column, row: &Row, index: usize, width: u16) -> Vec<String> {
    let text = match column.kind {
        ColumnKind::RowNumber => (index + 1).to_string(),
        ColumnKind::Actions => "⋯".to_string(),
        _ => row.display(&column.key),
    };
    let content_width = width.saturating_sub(1).max(1) as usize;
    match table.text_mode(&column.key) {
        Some(TextMode::Wrap) => {
            let mut lines = wrap_text(&text, content_width);
            lines.truncate(MAX_WRAP_LINES);
            lines
        }
        _ => vec![clip_text(&text, content_width)],
    }
}

/// Paint one cell's text at a content position, clipped against the
/// pane's left and right edges.
fn draw_cell(
    buf: &mut Buffer,
    line_area: Rect,
    content_left: i32,
    width: u16,
    scroll_x: u16,
    text: &str,
    style: Style,
) {
    let screen_left = content_left - scroll_x as i32;
    let screen_right = screen_left + width as i32;
    if screen_right <= 0 || screen_left >= line_area.width as i32 {
        return;
    }

    // Leave one trailing cell as the column gap.
    let content_width = width.saturating_sub(1) as usize;
    let (text, x, budget) = if screen_left < 0 {
        let skipped = skip_cells(text, (-screen_left) as usize);
        let budget = content_width.saturating_sub((-screen_left) as usize);
        (skipped, line_area.x, budget)
    } else {
        (
            text.to_string(),
            line_area.x + screen_left as u16,
            content_width,
        )
    };

    let budget = budget.min((line_area.x + line_area.width).saturating_sub(x) as usize);
    if budget == 0 {
        return;
    }
    buf.set_stringn(x, line_area.y, text, budget, style);
}

fn centered_message(buf: &mut Buffer, area: Rect, message: &str) {
    centered_message_styled(buf, area, message, Style::default().fg(Color::Gray));
}

/// A single full-width line with a centered message, spanning all
/// visible columns.
fn centered_message_styled(buf: &mut Buffer, area: Rect, message: &str, style: Style) {
    let text = clip_text(message, area.width as usize);
    let text_width = display_width(&text);
    let x = area.x + area.width.saturating_sub(text_width) / 2;
    let y = area.y + area.height / 2;
    buf.set_stringn(x, y, text, area.width as usize, style);
}
