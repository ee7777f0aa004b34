/// Buffer inspection helpers for widget tests.
use ratatui::buffer::Buffer;

/// Convert a buffer to a newline-joined string, preserving spacing.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area();
    let mut output = String::new();

    for y in 0..area.height {
        for x in 0..area.width {
            let cell = &buf[(x, y)];
            output.push_str(cell.symbol());
        }
        if y < area.height - 1 {
            output.push('\n');
        }
    }

    output
}

/// Text content of one buffer line.
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    let mut output = String::new();

    for x in 0..area.width {
        let cell = &buf[(x, line)];
        output.push_str(cell.symbol());
    }

    output
}
