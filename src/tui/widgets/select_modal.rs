use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::schema::SettingOption;

/// Centered option picker for select fields.
pub fn render_select_modal(
    options: &[SettingOption],
    index: usize,
    area: Rect,
    buf: &mut Buffer,
    theme: &ThemeConfig,
) {
    let inner_width = options
        .iter()
        .map(|o| option_text(o).width())
        .max()
        .unwrap_or(0)
        .max(10) as u16
        + 4;
    let width = (inner_width + 2).min(area.width);
    let height = (options.len() as u16 + 2).min(area.height);
    let modal = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    Clear.render(modal, buf);
    let block = Block::default().borders(Borders::ALL).title(" Select ");
    let inner = block.inner(modal);
    block.render(modal, buf);

    for (i, option) in options.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            break;
        }
        let (marker, style) = if i == index {
            ("► ", Style::default().fg(theme.selection_fg))
        } else {
            ("  ", Style::default())
        };
        buf.set_string(inner.x, y, format!("{}{}", marker, option_text(option)), style);
    }
}

fn option_text(option: &SettingOption) -> String {
    if option.audio_sample.is_some() {
        format!("{} ♪", option.label)
    } else {
        option.label.clone()
    }
}
