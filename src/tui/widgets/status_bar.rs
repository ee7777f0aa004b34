use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::tui::state::{EditorState, Mode};

/// Two-line footer: the selected field's description, then either the status
/// message or the key hints for the current mode, with the save state on the
/// right.
pub fn render_status_bar(state: &EditorState, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
    if area.height < 2 {
        return;
    }
    let y_desc = area.y;
    let y_info = area.y + 1;

    if let Some(row) = state.selected_row() {
        if let Some(desc) = &row.description {
            buf.set_string(
                area.x,
                y_desc,
                desc,
                Style::default().add_modifier(Modifier::DIM),
            );
        }
    }

    let left = match (&state.status, &state.mode) {
        (Some(status), _) => status.clone(),
        (None, Mode::Edit { .. }) => "Enter: commit  Esc: cancel".to_string(),
        (None, Mode::Select { .. }) => "↑/↓: choose  Enter: confirm  Esc: cancel".to_string(),
        (None, Mode::Browse) => "↑/↓: move  Enter: activate  s: save  q: quit".to_string(),
    };
    buf.set_string(area.x, y_info, &left, Style::default());

    let right = if state.dirty {
        "modified".to_string()
    } else if let Some(ts) = state.last_saved {
        format!("saved {}", ts.format("%H:%M:%S"))
    } else {
        String::new()
    };
    if !right.is_empty() {
        let x = area
            .right()
            .saturating_sub(right.width() as u16 + 1)
            .max(area.x);
        let style = if state.dirty {
            Style::default().fg(theme.selection_fg)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        buf.set_string(x, y_info, &right, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::FormContext;
    use crate::schema::Setting;
    use crate::tui::widgets::testing::buffer_to_string;
    use crate::value::normalize;
    use serde_json::json;

    fn state() -> EditorState {
        let schema: Vec<Setting> = serde_json::from_value(json!([
            {"name": "title", "kind": "text", "label": "Title",
             "description": "Shown on the adventure card."}
        ]))
        .unwrap();
        let tree = normalize(&schema, None);
        EditorState::new(schema, tree, FormContext::default(), &Config::default())
    }

    fn render(state: &EditorState) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 70, 2));
        render_status_bar(state, buf.area, &mut buf, &ThemeConfig::default());
        buffer_to_string(&buf)
    }

    #[test]
    fn test_shows_selected_description_and_hints() {
        let text = render(&state());
        assert!(text.contains("Shown on the adventure card."));
        assert!(text.contains("q: quit"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut state = state();
        state.status = Some("Save blocked: 1 invalid number value(s)".to_string());
        let text = render(&state);
        assert!(text.contains("Save blocked"));
        assert!(!text.contains("q: quit"));
    }

    #[test]
    fn test_dirty_indicator() {
        let mut state = state();
        state.dirty = true;
        assert!(render(&state).contains("modified"));
    }

    #[test]
    fn test_saved_timestamp() {
        let mut state = state();
        state.last_saved = Some(chrono::Local::now());
        assert!(render(&state).contains("saved "));
    }

    #[test]
    fn test_save_state_is_right_aligned() {
        let mut state = state();
        state.dirty = true;
        let mut buf = Buffer::empty(Rect::new(0, 0, 70, 2));
        render_status_bar(&state, buf.area, &mut buf, &ThemeConfig::default());
        let line = crate::tui::widgets::testing::buffer_line(&buf, 1);
        // "modified" ends one column before the right edge.
        assert_eq!(line.find("modified"), Some(70 - 1 - "modified".width()));
    }
}
