//! Composer keyboard shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Formatting and editing shortcuts understood by the comment box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposerShortcut {
    Bold,
    Italic,
    Strike,
    Link,
    /// Insert a newline instead of submitting.
    LineBreak,
    /// Swallowed so the surrounding view does not react to it.
    Suppressed,
}

impl ComposerShortcut {
    /// Maps a key press to a shortcut.
    ///
    /// `Ctrl+B`, `Ctrl+I` format; `Ctrl+Shift+X` strikes; `Ctrl+Alt+K`
    /// inserts a link; `Shift+Enter` and `Alt+Enter` break the line;
    /// `Ctrl+Shift+E` is suppressed.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Enter if (shift || alt) && !ctrl => Some(Self::LineBreak),
            KeyCode::Char(c) if ctrl => {
                let c = c.to_ascii_lowercase();
                match (c, alt, shift) {
                    ('b', false, false) => Some(Self::Bold),
                    ('i', false, false) => Some(Self::Italic),
                    ('x', false, true) => Some(Self::Strike),
                    ('e', false, true) => Some(Self::Suppressed),
                    ('k', true, _) => Some(Self::Link),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('b'), KeyModifiers::CONTROL, Some(ComposerShortcut::Bold) ; "ctrl_b")]
    #[test_case(KeyCode::Char('i'), KeyModifiers::CONTROL, Some(ComposerShortcut::Italic) ; "ctrl_i")]
    #[test_case(KeyCode::Char('X'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, Some(ComposerShortcut::Strike) ; "ctrl_shift_x")]
    #[test_case(KeyCode::Char('k'), KeyModifiers::CONTROL | KeyModifiers::ALT, Some(ComposerShortcut::Link) ; "ctrl_alt_k")]
    #[test_case(KeyCode::Char('E'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, Some(ComposerShortcut::Suppressed) ; "ctrl_shift_e")]
    #[test_case(KeyCode::Enter, KeyModifiers::SHIFT, Some(ComposerShortcut::LineBreak) ; "shift_enter")]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, None ; "plain_enter")]
    #[test_case(KeyCode::Char('b'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, None ; "ctrl_shift_b")]
    #[test_case(KeyCode::Char('b'), KeyModifiers::NONE, None ; "plain_b")]
    fn test_from_key(code: KeyCode, modifiers: KeyModifiers, expected: Option<ComposerShortcut>) {
        assert_eq!(ComposerShortcut::from_key(KeyEvent::new(code, modifiers)), expected);
    }
}
