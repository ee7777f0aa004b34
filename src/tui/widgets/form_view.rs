use ratatui::{buffer::Buffer, layout::Rect};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::form::ControlRow;
use crate::tui::state::{EditorState, Mode};

use super::row::render_row;

/// Render the flattened form into the given area, keeping the selected row
/// visible.
pub fn render_form(state: &EditorState, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
    let rows = state.rows();
    if rows.is_empty() || area.height == 0 {
        return;
    }

    let label_width = label_column_width(&rows);
    let edit_buffer = match &state.mode {
        Mode::Edit { buffer } => Some(buffer.as_str()),
        _ => None,
    };

    // Scroll just enough to keep the selection on screen.
    let height = area.height as usize;
    let start = if state.selected >= height {
        state.selected + 1 - height
    } else {
        0
    };

    let mut y = area.y;
    for (i, row) in rows.iter().enumerate().skip(start) {
        let consumed = render_row(
            row,
            i == state.selected,
            edit_buffer,
            label_width,
            area,
            y,
            buf,
            theme,
        );
        if consumed == 0 {
            break;
        }
        y += consumed;
    }
}

/// Widest (indent + label) cell, so value columns line up across depths.
fn label_column_width(rows: &[ControlRow]) -> usize {
    rows.iter()
        .map(|r| (r.depth as usize) * 2 + r.label.width())
        .max()
        .unwrap_or(0)
}
