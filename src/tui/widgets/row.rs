/// Renders one control row: indent + selection indicator + label + value.
///
/// Always consumes 1 line; multiline text is collapsed to its first line.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::form::{Control, ControlRow};

pub fn render_row(
    row: &ControlRow,
    is_selected: bool,
    edit_buffer: Option<&str>,
    label_width: usize,
    area: Rect,
    y: u16,
    buf: &mut Buffer,
    theme: &ThemeConfig,
) -> u16 {
    if y >= area.bottom() {
        return 0;
    }

    let mut x = area.x;

    // Indentation by nesting depth
    let indent = (row.depth * 2) as usize;
    buf.set_string(x, y, " ".repeat(indent), Style::default());
    x += indent as u16;

    // Selection indicator
    if is_selected {
        buf.set_string(x, y, "► ", Style::default().fg(theme.selection_fg));
    } else {
        buf.set_string(x, y, "  ", Style::default());
    }
    x += 2;

    // Structural rows render their own full line.
    match &row.control {
        Control::Divider => {
            let text = if row.label.is_empty() {
                "─".repeat(area.width.saturating_sub(x) as usize)
            } else {
                format!("── {} ──", row.label)
            };
            buf.set_string(x, y, &text, Style::default().add_modifier(Modifier::BOLD));
            return 1;
        }
        Control::ListHeader { len } => {
            let text = format!("{} ({})", row.label, len);
            buf.set_string(x, y, &text, Style::default().add_modifier(Modifier::BOLD));
            return 1;
        }
        _ => {}
    }

    // Padded label, aligned across depths
    let pad = label_width.saturating_sub(indent);
    let padded = format!("{:<pad$}  ", row.label, pad = pad);
    let label_style = if row.unused {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    buf.set_string(x, y, &padded, label_style);
    x += padded.width() as u16;

    let value_style = if row.gate.is_some() {
        Style::default().fg(theme.gate_fg)
    } else {
        Style::default()
    };

    let is_editing = is_selected && edit_buffer.is_some();
    let text = match &row.control {
        Control::TextInput { value, .. } => {
            if is_editing {
                format!("{}█", edit_buffer.unwrap_or_default())
            } else {
                first_line(value)
            }
        }
        Control::NumberInput { display, invalid, .. } => {
            if is_editing {
                format!("{}█", edit_buffer.unwrap_or_default())
            } else if *invalid {
                let text = format!("{} (invalid)", display);
                buf.set_string(x, y, &text, Style::default().fg(theme.invalid_fg));
                return 1;
            } else {
                display.clone()
            }
        }
        Control::Checkbox { checked } => {
            if *checked { "[✔]".to_string() } else { "[ ]".to_string() }
        }
        Control::Select { options, current } => {
            let label = options
                .iter()
                .find(|o| &o.value == current)
                .map(|o| o.label.as_str())
                .unwrap_or(current.as_str());
            format!("▼ {}", label)
        }
        Control::RadioGroup { options, current } => options
            .iter()
            .map(|o| {
                let marker = if &o.value == current { "(•)" } else { "( )" };
                // Options carrying an audio preview get a note marker.
                let note = if o.audio_sample.is_some() { " ♪" } else { "" };
                format!("{} {}{}", marker, o.label, note)
            })
            .collect::<Vec<_>>()
            .join("  "),
        Control::TagEditor { tags } => {
            if is_editing {
                format!("{}█", edit_buffer.unwrap_or_default())
            } else {
                tags.join(", ")
            }
        }
        Control::FilePicker { path } => {
            if is_editing {
                format!("{}█", edit_buffer.unwrap_or_default())
            } else {
                path.as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "(none)".to_string())
            }
        }
        Control::ListItemRemove { .. } => "✕ remove".to_string(),
        Control::ListAdd => "+ add item".to_string(),
        Control::Divider | Control::ListHeader { .. } => unreachable!(),
    };
    buf.set_string(x, y, &text, value_style);
    x += text.width() as u16;

    if row.gate.is_some() {
        buf.set_string(x, y, " 🔒", Style::default().fg(theme.gate_fg));
    }

    1
}

fn first_line(value: &str) -> String {
    match value.split_once('\n') {
        Some((first, _)) => format!("{}…", first),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Gate;
    use crate::path::FieldPath;
    use crate::schema::SettingOption;
    use crate::tui::widgets::testing::buffer_line;

    fn theme() -> ThemeConfig {
        ThemeConfig::default()
    }

    fn row(label: &str, control: Control) -> ControlRow {
        ControlRow {
            path: FieldPath::field("x"),
            label: label.to_string(),
            description: None,
            depth: 0,
            gate: None,
            unused: false,
            control,
        }
    }

    fn render(r: &ControlRow, selected: bool, edit: Option<&str>) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 1));
        let area = Rect::new(0, 0, 60, 1);
        let h = render_row(r, selected, edit, 14, area, 0, &mut buf, &theme());
        assert_eq!(h, 1);
        buffer_line(&buf, 0).trim_end().to_string()
    }

    #[test]
    fn test_text_row() {
        let r = row("Title", Control::TextInput { value: "Untitled".to_string(), multiline: false });
        let line = render(&r, false, None);
        assert!(line.contains("Title"));
        assert!(line.contains("Untitled"));
        assert!(!line.contains("►"));
    }

    #[test]
    fn test_selected_row_shows_indicator() {
        let r = row("Title", Control::TextInput { value: "Untitled".to_string(), multiline: false });
        let line = render(&r, true, None);
        assert!(line.starts_with("►"));
    }

    #[test]
    fn test_editing_shows_cursor() {
        let r = row("Title", Control::TextInput { value: "old".to_string(), multiline: false });
        let line = render(&r, true, Some("new"));
        assert!(line.contains("new█"));
        assert!(!line.contains("old"));
    }

    #[test]
    fn test_multiline_collapses_to_first_line() {
        let r = row(
            "Synopsis",
            Control::TextInput { value: "line one\nline two".to_string(), multiline: true },
        );
        let line = render(&r, false, None);
        assert!(line.contains("line one…"));
        assert!(!line.contains("line two"));
    }

    #[test]
    fn test_checkbox_states() {
        let checked = render(&row("Hardcore", Control::Checkbox { checked: true }), false, None);
        assert!(checked.contains("[✔]"));
        let unchecked = render(&row("Hardcore", Control::Checkbox { checked: false }), false, None);
        assert!(unchecked.contains("[ ]"));
    }

    #[test]
    fn test_invalid_number_marked() {
        let r = row(
            "Max turns",
            Control::NumberInput { display: "abc".to_string(), invalid: true, float: false },
        );
        let line = render(&r, false, None);
        assert!(line.contains("abc (invalid)"));
    }

    #[test]
    fn test_select_shows_option_label() {
        let r = row(
            "Theme",
            Control::Select {
                options: vec![SettingOption::new("dark", "Dark")],
                current: "dark".to_string(),
            },
        );
        let line = render(&r, false, None);
        assert!(line.contains("▼ Dark"));
    }

    #[test]
    fn test_radio_group_marks_current() {
        let r = row(
            "Voice",
            Control::RadioGroup {
                options: vec![
                    SettingOption::new("narrator", "Narrator"),
                    SettingOption::new("hero", "Hero"),
                ],
                current: "hero".to_string(),
            },
        );
        let line = render(&r, false, None);
        assert!(line.contains("( ) Narrator"));
        assert!(line.contains("(•) Hero"));
    }

    #[test]
    fn test_radio_option_with_audio_sample_marked() {
        let mut sampled = SettingOption::new("sage", "Sage");
        sampled.audio_sample = Some("sage.mp3".to_string());
        let r = row(
            "Voice",
            Control::RadioGroup {
                options: vec![sampled, SettingOption::new("hero", "Hero")],
                current: "sage".to_string(),
            },
        );
        let line = render(&r, false, None);
        assert!(line.contains("(•) Sage ♪"));
        assert!(line.contains("( ) Hero"));
        assert!(!line.contains("Hero ♪"));
    }

    #[test]
    fn test_gated_row_shows_lock() {
        let mut r = row("Cloning", Control::TextInput { value: String::new(), multiline: false });
        r.gate = Some(Gate {
            message: "Needs approval.".to_string(),
            share_url: "https://x/adventures/1".to_string(),
        });
        let line = render(&r, false, None);
        assert!(line.contains("🔒"));
    }

    #[test]
    fn test_divider_renders_label_rule() {
        let r = row("Story", Control::Divider);
        let line = render(&r, false, None);
        assert!(line.contains("── Story ──"));
    }

    #[test]
    fn test_list_header_shows_count() {
        let r = row("Chapters", Control::ListHeader { len: 3 });
        let line = render(&r, false, None);
        assert!(line.contains("Chapters (3)"));
    }

    #[test]
    fn test_labels_align_across_depths() {
        let shallow = row("A", Control::TextInput { value: "v1".to_string(), multiline: false });
        let mut deep = row("B", Control::TextInput { value: "v2".to_string(), multiline: false });
        deep.depth = 2;

        let line1 = render(&shallow, false, None);
        let line2 = render(&deep, false, None);
        assert_eq!(line1.find("v1"), line2.find("v2"));
    }

    #[test]
    fn test_row_past_bottom_not_rendered() {
        let r = row("Title", Control::TextInput { value: "x".to_string(), multiline: false });
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 2));
        let area = Rect::new(0, 0, 60, 2);
        let h = render_row(&r, false, None, 14, area, 2, &mut buf, &theme());
        assert_eq!(h, 0);
    }
}
