//! Keyboard-driven markdown formatting of a text selection.

/// Formatting applied by a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownMode {
    Bold,
    Italic,
    Strike,
    Link,
}

impl MarkdownMode {
    const fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Strike => "~~",
            Self::Link => "",
        }
    }
}

/// Message text and selection after formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownEdit {
    pub message: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

const LINK_URL_PLACEHOLDER: &str = "url";

/// Toggles `mode` around the selected text.
///
/// Offsets are byte offsets into `message`; they are clamped to the text
/// and moved back onto char boundaries. A selection already wrapped in the
/// mode's markers is unwrapped, anything else is wrapped. An empty
/// selection inserts the markers with the caret between them. Links wrap
/// the selection as `[text](url)` and select the `url` placeholder.
#[must_use]
pub fn apply_markdown(
    mode: MarkdownMode,
    selection_start: usize,
    selection_end: usize,
    message: &str,
) -> MarkdownEdit {
    let mut start = floor_char_boundary(message, selection_start);
    let mut end = floor_char_boundary(message, selection_end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let prefix = &message[..start];
    let selected = &message[start..end];
    let suffix = &message[end..];

    if mode == MarkdownMode::Link {
        return apply_link(prefix, selected, suffix);
    }

    let delimiter = mode.delimiter();
    if is_wrapped(mode, prefix, suffix) {
        let new_prefix = &prefix[..prefix.len() - delimiter.len()];
        let new_suffix = &suffix[delimiter.len()..];
        let selection_start = new_prefix.len();
        return MarkdownEdit {
            message: format!("{new_prefix}{selected}{new_suffix}"),
            selection_start,
            selection_end: selection_start + selected.len(),
        };
    }

    let selection_start = prefix.len() + delimiter.len();
    MarkdownEdit {
        message: format!("{prefix}{delimiter}{selected}{delimiter}{suffix}"),
        selection_start,
        selection_end: selection_start + selected.len(),
    }
}

fn is_wrapped(mode: MarkdownMode, prefix: &str, suffix: &str) -> bool {
    match mode {
        MarkdownMode::Italic => {
            // `*` inside `**bold**` is not italic unless it is `***both***`.
            let before = prefix.ends_with('*') && (!prefix.ends_with("**") || prefix.ends_with("***"));
            let after = suffix.starts_with('*') && (!suffix.starts_with("**") || suffix.starts_with("***"));
            before && after
        }
        _ => {
            let delimiter = mode.delimiter();
            prefix.ends_with(delimiter) && suffix.starts_with(delimiter)
        }
    }
}

fn apply_link(prefix: &str, selected: &str, suffix: &str) -> MarkdownEdit {
    let link_tail = format!("]({LINK_URL_PLACEHOLDER})");
    if prefix.ends_with('[') && suffix.starts_with(&link_tail) {
        let new_prefix = &prefix[..prefix.len() - 1];
        let new_suffix = &suffix[link_tail.len()..];
        let selection_start = new_prefix.len();
        return MarkdownEdit {
            message: format!("{new_prefix}{selected}{new_suffix}"),
            selection_start,
            selection_end: selection_start + selected.len(),
        };
    }

    let message = format!("{prefix}[{selected}]({LINK_URL_PLACEHOLDER}){suffix}");
    if selected.is_empty() {
        let caret = prefix.len() + 1;
        return MarkdownEdit {
            message,
            selection_start: caret,
            selection_end: caret,
        };
    }

    let url_start = prefix.len() + 1 + selected.len() + 2;
    MarkdownEdit {
        message,
        selection_start: url_start,
        selection_end: url_start + LINK_URL_PLACEHOLDER.len(),
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(MarkdownMode::Bold, "hello world", 6, 11, "hello **world**", 8, 13 ; "bold_wraps")]
    #[test_case(MarkdownMode::Bold, "hello **world**", 8, 13, "hello world", 6, 11 ; "bold_unwraps")]
    #[test_case(MarkdownMode::Italic, "hello world", 0, 5, "*hello* world", 1, 6 ; "italic_wraps")]
    #[test_case(MarkdownMode::Italic, "*hello* world", 1, 6, "hello world", 0, 5 ; "italic_unwraps")]
    #[test_case(MarkdownMode::Italic, "**hello**", 2, 7, "***hello***", 3, 8 ; "italic_inside_bold_wraps")]
    #[test_case(MarkdownMode::Strike, "abc", 0, 3, "~~abc~~", 2, 5 ; "strike_wraps")]
    #[test_case(MarkdownMode::Bold, "abc", 3, 3, "abc****", 5, 5 ; "empty_selection_places_caret")]
    #[test_case(MarkdownMode::Link, "see docs", 4, 8, "see [docs](url)", 11, 14 ; "link_selects_url")]
    #[test_case(MarkdownMode::Link, "see ", 4, 4, "see [](url)", 5, 5 ; "empty_link")]
    #[test_case(MarkdownMode::Link, "see [docs](url)", 5, 9, "see docs", 4, 8 ; "link_unwraps")]
    fn test_apply_markdown(
        mode: MarkdownMode,
        message: &str,
        start: usize,
        end: usize,
        expected: &str,
        expected_start: usize,
        expected_end: usize,
    ) {
        let edit = apply_markdown(mode, start, end, message);
        assert_eq!(edit.message, expected);
        assert_eq!((edit.selection_start, edit.selection_end), (expected_start, expected_end));
    }

    #[test]
    fn test_reversed_and_out_of_range_selection() {
        let edit = apply_markdown(MarkdownMode::Bold, 99, 0, "hi");
        assert_eq!(edit.message, "**hi**");
    }

    #[test]
    fn test_selection_inside_multibyte_char() {
        let edit = apply_markdown(MarkdownMode::Strike, 1, 2, "é!");
        assert_eq!(edit.message, "~~é~~!");
    }
}
