//! Unread-messages toast.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::services::{ToastDecision, ToastKind};

const JUMP_HINT: &str = "Jump to new messages";

/// One-line banner announcing unread posts.
#[derive(Debug, Clone)]
pub struct ToastWidget {
    decision: ToastDecision,
}

impl ToastWidget {
    #[must_use]
    pub const fn new(decision: ToastDecision) -> Self {
        Self { decision }
    }

    /// Banner text, or `None` when the toast is hidden.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if !self.decision.visible {
            return None;
        }

        let count = self.decision.count;
        let noun = if count == 1 { "message" } else { "messages" };
        Some(match self.decision.kind {
            ToastKind::NewMessages => format!("{count} new {noun}"),
            ToastKind::UnreadSinceLastVisit => {
                format!("{count} unread {noun} since last visit")
            }
        })
    }
}

impl Widget for &ToastWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(message) = self.message() else {
            return;
        };

        let style = Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD);

        let width = usize::from(area.width);
        let mut spans = vec![Span::styled(format!(" {message} "), style)];
        let used = message.width() + 2;
        let hint = format!(" {JUMP_HINT} ↓ ");
        if used + hint.width() <= width {
            spans.push(Span::raw(" ".repeat(width - used - hint.width())));
            spans.push(Span::styled(hint, style.remove_modifier(Modifier::BOLD)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

impl Widget for ToastWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::render::render_to_string;

    fn decision(visible: bool, count: usize, kind: ToastKind) -> ToastDecision {
        ToastDecision {
            visible,
            count,
            kind,
        }
    }

    #[test]
    fn test_hidden_toast_renders_nothing() {
        let widget = ToastWidget::new(decision(false, 0, ToastKind::NewMessages));

        assert_eq!(widget.message(), None);
        assert_eq!(render_to_string(widget, 40, 1), "");
    }

    #[test]
    fn test_new_messages_banner_with_hint() {
        let widget = ToastWidget::new(decision(true, 3, ToastKind::NewMessages));

        let text = render_to_string(widget, 50, 1);

        assert!(text.starts_with(" 3 new messages"));
        assert!(text.ends_with("Jump to new messages ↓"));
    }

    #[test]
    fn test_singular_and_since_last_visit() {
        let widget = ToastWidget::new(decision(true, 1, ToastKind::UnreadSinceLastVisit));

        assert_eq!(
            widget.message().as_deref(),
            Some("1 unread message since last visit")
        );
    }

    #[test]
    fn test_narrow_area_drops_hint() {
        let widget = ToastWidget::new(decision(true, 12, ToastKind::NewMessages));

        assert_eq!(render_to_string(widget, 20, 1), " 12 new messages");
    }
}
