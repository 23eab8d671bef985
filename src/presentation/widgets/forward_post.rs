//! Forward-post modal view.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::application::services::channel_search::OptionGroup;
use crate::application::services::forward_post::{
    COMMENT_PLACEHOLDER, FORWARD_TITLE, ForwardPostModal, PICKER_PLACEHOLDER,
};
use crate::application::services::option_format::{FormattedOption, format_option};
use crate::domain::store::StoreSnapshot;

const COMMENT_HEIGHT: u16 = 3;

/// Draws the modal: picker value, grouped options, comment box and error.
pub struct ForwardPostView<'a> {
    modal: &'a ForwardPostModal,
    groups: &'a [OptionGroup],
    store: &'a StoreSnapshot,
}

impl<'a> ForwardPostView<'a> {
    #[must_use]
    pub const fn new(
        modal: &'a ForwardPostModal,
        groups: &'a [OptionGroup],
        store: &'a StoreSnapshot,
    ) -> Self {
        Self {
            modal,
            groups,
            store,
        }
    }

    fn picker_line(&self) -> Line<'a> {
        match self.modal.selected_channel() {
            Some(option) => {
                let formatted = format_option(self.store, &option.details);
                Line::from(vec![
                    Span::styled("To: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("{} {}", formatted.icon.glyph(), formatted.name)),
                ])
            }
            None => Line::from(vec![
                Span::styled("To: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(PICKER_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ]),
        }
    }

    fn option_lines(&self) -> Vec<Line<'a>> {
        let selected = self.modal.selected_channel().map(|option| &option.value);
        let mut lines = Vec::new();

        for group in self.groups {
            lines.push(Line::styled(
                group.label.to_uppercase(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ));
            for option in &group.options {
                let formatted = format_option(self.store, &option.details);
                let is_selected = selected == Some(&option.value);
                lines.push(option_line(&formatted, is_selected));
            }
        }

        lines
    }

    fn comment_paragraph(&self) -> Paragraph<'a> {
        let enabled = self.modal.can_post();
        let border_style = if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let comment = self.modal.comment();
        let paragraph = if comment.is_empty() {
            Paragraph::new(Span::styled(
                COMMENT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Paragraph::new(comment.to_string())
        };

        paragraph.block(block).wrap(Wrap { trim: false })
    }

    fn status_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        if let Some(error) = self.modal.post_error() {
            lines.push(Line::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ));
        }
        if self.modal.bad_connection() {
            lines.push(Line::styled(
                "Connection lost; forwarding may be delayed",
                Style::default().fg(Color::Yellow),
            ));
        }
        lines
    }
}

fn option_line<'a>(option: &FormattedOption, selected: bool) -> Line<'a> {
    let marker = if selected { "> " } else { "  " };
    let mut spans = vec![
        Span::raw(marker),
        Span::raw(format!("{} ", option.icon.glyph())),
        Span::styled(
            option.name.clone(),
            if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
    ];

    if option.show_description && !option.description.is_empty() {
        spans.push(Span::styled(
            format!(" {}", option.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    for tag in &option.tags {
        spans.push(Span::styled(
            format!(" [{}]", tag.label()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if option.shared {
        spans.push(Span::raw(" ⇄"));
    }
    if let Some(team) = &option.team_name {
        spans.push(Span::styled(
            format!(" ({team})"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

impl Widget for ForwardPostView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {FORWARD_TITLE} "));
        let inner = block.inner(area);
        block.render(area, buf);

        let status = self.status_lines();
        let status_height = u16::try_from(status.len()).unwrap_or(u16::MAX);

        let [picker, options, comment, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(COMMENT_HEIGHT),
            Constraint::Length(status_height),
        ])
        .areas(inner);

        Paragraph::new(self.picker_line()).render(picker, buf);
        Paragraph::new(self.option_lines()).render(options, buf);
        self.comment_paragraph().render(comment, buf);
        Paragraph::new(status).render(footer, buf);
    }
}
