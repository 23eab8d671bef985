//! Static "Executing Commands" help page.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// A block of help content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpBlock {
    Title(&'static str),
    Heading(&'static str),
    Text(&'static str),
    /// External reference shown under the preceding paragraph.
    Link(HelpLink),
    Rule,
}

/// A link to another help page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLink {
    pub path: &'static str,
    pub label: &'static str,
}

const COMMANDS_CONTENT: &[HelpBlock] = &[
    HelpBlock::Title("Executing Commands"),
    HelpBlock::Rule,
    HelpBlock::Text(
        "Slash commands perform operations from the message box. Type `/` \
         followed by a command and its arguments to run one.",
    ),
    HelpBlock::Heading("Built-In Commands"),
    HelpBlock::Text(
        "Every server ships with a set of built-in slash commands. The product \
         documentation lists all of them.",
    ),
    HelpBlock::Link(HelpLink {
        path: "https://docs.mattermost.com/messaging/executing-slash-commands.html",
        label: "Product documentation: built-in slash commands",
    }),
    HelpBlock::Text(
        "Start by typing `/`. Suggestions appear above the message box, each \
         with an example of its format and a short description.",
    ),
    HelpBlock::Heading("Custom Commands"),
    HelpBlock::Text(
        "Custom slash commands connect to external applications. A team could \
         look up internal health records with `/patient joe smith` or fetch the \
         weekly forecast for a city with `/weather toronto week`. Ask your \
         System Admin, or type `/` to open the suggestions, to find out which \
         custom commands your organization offers.",
    ),
    HelpBlock::Text(
        "Custom slash commands are off by default. A System Admin can turn them \
         on in the System Console under **Integrations > Integration Management**.",
    ),
    HelpBlock::Link(HelpLink {
        path: "https://developers.mattermost.com/integrate/slash-commands/",
        label: "Developer documentation: configuring custom slash commands",
    }),
];

const LEARN_MORE_LABEL: &str = "Learn more about:";

const LEARN_MORE: &[HelpLink] = &[
    HelpLink {
        path: "/help/messaging",
        label: "Basic Messaging",
    },
    HelpLink {
        path: "/help/composing",
        label: "Composing Messages and Replies",
    },
    HelpLink {
        path: "/help/mentioning",
        label: "Mentioning Teammates",
    },
    HelpLink {
        path: "/help/formatting",
        label: "Formatting Messages Using Markdown",
    },
    HelpLink {
        path: "/help/attaching",
        label: "Attaching Files",
    },
];

/// The commands help page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommandsPage;

impl HelpCommandsPage {
    #[must_use]
    pub const fn blocks(self) -> &'static [HelpBlock] {
        COMMANDS_CONTENT
    }

    #[must_use]
    pub const fn links(self) -> &'static [HelpLink] {
        LEARN_MORE
    }

    /// Styled lines of the whole page.
    #[must_use]
    pub fn lines(self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for block in self.blocks() {
            match block {
                HelpBlock::Title(text) => lines.push(Line::styled(
                    *text,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                HelpBlock::Heading(text) => {
                    lines.push(Line::default());
                    lines.push(Line::styled(
                        *text,
                        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    ));
                }
                HelpBlock::Text(text) => {
                    lines.push(Line::default());
                    lines.push(inline_markup(text));
                }
                HelpBlock::Link(link) => lines.push(link_line("  → ", link)),
                HelpBlock::Rule => {
                    lines.push(Line::raw("─".repeat(usize::from(width))));
                }
            }
        }

        lines.push(Line::default());
        lines.push(Line::raw(LEARN_MORE_LABEL));
        for link in self.links() {
            lines.push(link_line("  • ", link));
        }

        lines
    }
}

fn link_line(bullet: &'static str, link: &HelpLink) -> Line<'static> {
    Line::from(vec![
        Span::raw(bullet),
        Span::styled(link.label, Style::default().fg(Color::Blue)),
        Span::styled(
            format!(" ({})", link.path),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Styles `code` spans and `**bold**` runs.
fn inline_markup(text: &'static str) -> Line<'static> {
    let code = Style::default().fg(Color::Yellow);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    for (i, segment) in text.split('`').enumerate() {
        if i % 2 == 1 {
            spans.push(Span::styled(segment, code));
            continue;
        }
        for (j, run) in segment.split("**").enumerate() {
            if run.is_empty() {
                continue;
            }
            if j % 2 == 1 {
                spans.push(Span::styled(run, bold));
            } else {
                spans.push(Span::raw(run));
            }
        }
    }

    Line::from(spans)
}

impl Widget for HelpCommandsPage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines(area.width))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::render::render_to_string;

    #[test]
    fn test_page_has_sections_and_examples() {
        let text = render_to_string(HelpCommandsPage, 240, 40);

        assert!(text.starts_with("Executing Commands"));
        assert!(text.contains("Built-In Commands"));
        assert!(text.contains("Custom Commands"));
        assert!(text.contains("/patient joe smith"));
        assert!(text.contains("/weather toronto week"));
        assert!(text.contains("Integrations > Integration Management"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_documentation_links_follow_their_sections() {
        let blocks = HelpCommandsPage.blocks();
        let heading = |name: &'static str| {
            blocks
                .iter()
                .position(|block| *block == HelpBlock::Heading(name))
                .unwrap()
        };
        let links: Vec<(usize, &str)> = blocks
            .iter()
            .enumerate()
            .filter_map(|(i, block)| match block {
                HelpBlock::Link(link) => Some((i, link.path)),
                _ => None,
            })
            .collect();

        assert_eq!(links.len(), 2);
        assert!(links[0].0 > heading("Built-In Commands") && links[0].0 < heading("Custom Commands"));
        assert!(links[0].1.ends_with("executing-slash-commands.html"));
        assert!(links[1].0 > heading("Custom Commands"));
        assert!(links[1].1.ends_with("/integrate/slash-commands/"));

        let text = render_to_string(HelpCommandsPage, 240, 40);
        assert!(text.contains("→ Product documentation: built-in slash commands (https://"));
        assert!(text.contains("→ Developer documentation: configuring custom slash commands"));
    }

    #[test]
    fn test_learn_more_links() {
        let labels: Vec<&str> = HelpCommandsPage.links().iter().map(|l| l.label).collect();

        assert_eq!(
            labels,
            vec![
                "Basic Messaging",
                "Composing Messages and Replies",
                "Mentioning Teammates",
                "Formatting Messages Using Markdown",
                "Attaching Files",
            ]
        );
    }

    #[test]
    fn test_inline_markup_strips_markers() {
        let line = inline_markup("run `/away` or **bold** now");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(text, "run /away or bold now");
        assert_eq!(line.spans[1].style.fg, Some(Color::Yellow));
    }
}
