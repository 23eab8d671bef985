//! Off-screen rendering for CLI output and tests.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::UnicodeWidthStr;

/// Renders `widget` into a `width` x `height` buffer and returns its text.
///
/// Trailing spaces on each row and trailing blank rows are dropped.
#[must_use]
pub fn render_to_string<W: Widget>(widget: W, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Converts a buffer to text, one line per row.
#[must_use]
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut rows: Vec<String> = Vec::with_capacity(usize::from(area.height));

    for y in area.top()..area.bottom() {
        let mut row = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buf[(x, y)].symbol();
            skip = symbol.width().saturating_sub(1);
            row.push_str(symbol);
        }
        rows.push(row.trim_end().to_string());
    }

    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }
    rows.join("\n")
}
