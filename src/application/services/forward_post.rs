//! State of the "Forward Message" modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;
use tracing::{debug, info};

use super::channel_search::ChannelOption;
use super::markdown_shortcuts::{MarkdownMode, apply_markdown};
use crate::domain::entities::{ChannelId, Permissions, Post, PostId};
use crate::domain::errors::ForwardError;
use crate::domain::keybinding::ComposerShortcut;
use crate::domain::store::StoreSnapshot;

/// Modal title.
pub const FORWARD_TITLE: &str = "Forward Message";
/// Placeholder of the channel picker.
pub const PICKER_PLACEHOLDER: &str = "Select channel or people";
/// Placeholder of the comment box.
pub const COMMENT_PLACEHOLDER: &str = "Add a comment (optional)";

/// More than this many connection errors counts as a bad connection.
const BAD_CONNECTION_THRESHOLD: u32 = 1;

/// A validated forward, ready to hand to the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardRequest {
    pub post_id: PostId,
    pub channel_id: ChannelId,
    pub comment: String,
}

/// Outcome of a key press in the comment box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Handled,
    Ignored,
}

/// Channel picker plus comment composer.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct ForwardPostModal {
    post_id: PostId,
    selected: Option<ChannelOption>,
    can_post_in_selected: bool,
    comment: String,
    selection_start: usize,
    selection_end: usize,
    post_error: Option<ForwardError>,
    max_post_size: usize,
    bad_connection: bool,
    use_channel_mentions: bool,
    enable_emoji_picker: bool,
}

impl ForwardPostModal {
    /// Opens the modal for `post`.
    #[must_use]
    pub fn new(store: &StoreSnapshot, post: &Post) -> Self {
        let use_channel_mentions = store
            .current_channel_id
            .as_ref()
            .is_some_and(|id| {
                store
                    .permissions_in(id)
                    .contains(Permissions::USE_CHANNEL_MENTIONS)
            });

        Self {
            post_id: post.id().clone(),
            selected: None,
            can_post_in_selected: false,
            comment: String::new(),
            selection_start: 0,
            selection_end: 0,
            post_error: None,
            max_post_size: store.config.character_limit(),
            bad_connection: store.views.connection_error_count > BAD_CONNECTION_THRESHOLD,
            use_channel_mentions,
            enable_emoji_picker: store.config.enable_emoji_picker,
        }
    }

    /// Picks the destination channel and re-checks posting permission.
    pub fn select_channel(&mut self, store: &StoreSnapshot, option: ChannelOption) {
        self.can_post_in_selected = store
            .permissions_in(&option.value)
            .contains(Permissions::CREATE_POST);
        debug!(
            channel = %option.value,
            can_post = self.can_post_in_selected,
            "forward destination selected"
        );
        self.selected = Some(option);
        if !self.post_error.as_ref().is_some_and(ForwardError::is_comment_error) {
            self.post_error = None;
        }
    }

    #[must_use]
    pub fn selected_channel(&self) -> Option<&ChannelOption> {
        self.selected.as_ref()
    }

    /// The comment box is only enabled when posting to the selection is allowed.
    #[must_use]
    pub const fn can_post(&self) -> bool {
        self.selected.is_some() && self.can_post_in_selected
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub const fn caret_position(&self) -> usize {
        self.selection_end
    }

    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    #[must_use]
    pub const fn post_error(&self) -> Option<&ForwardError> {
        self.post_error.as_ref()
    }

    #[must_use]
    pub const fn max_post_size(&self) -> usize {
        self.max_post_size
    }

    #[must_use]
    pub const fn bad_connection(&self) -> bool {
        self.bad_connection
    }

    #[must_use]
    pub const fn use_channel_mentions(&self) -> bool {
        self.use_channel_mentions
    }

    #[must_use]
    pub const fn enable_emoji_picker(&self) -> bool {
        self.enable_emoji_picker
    }

    /// Replaces the comment and moves the caret to its end.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
        self.selection_start = self.comment.len();
        self.selection_end = self.comment.len();
        self.validate_length();
    }

    /// Collapses the selection to a caret at `position`.
    pub fn set_caret(&mut self, position: usize) {
        self.set_selection(position, position);
    }

    /// Sets the selection in byte offsets, clamped to the comment.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.comment.len();
        self.selection_start = start.min(len);
        self.selection_end = end.min(len);
        while !self.comment.is_char_boundary(self.selection_start) {
            self.selection_start -= 1;
        }
        while !self.comment.is_char_boundary(self.selection_end) {
            self.selection_end -= 1;
        }
    }

    /// Replaces the selection with `text`.
    pub fn insert_text(&mut self, text: &str) {
        let (start, end) = self.ordered_selection();
        self.comment.replace_range(start..end, text);
        self.selection_start = start + text.len();
        self.selection_end = self.selection_start;
        self.validate_length();
    }

    /// Handles a key press in the comment box.
    ///
    /// Enter never submits; the modal is sent from its explicit action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerAction {
        if !self.can_post() {
            return ComposerAction::Ignored;
        }

        if let Some(shortcut) = ComposerShortcut::from_key(key) {
            match shortcut {
                ComposerShortcut::Bold => self.apply(MarkdownMode::Bold),
                ComposerShortcut::Italic => self.apply(MarkdownMode::Italic),
                ComposerShortcut::Strike => self.apply(MarkdownMode::Strike),
                ComposerShortcut::Link => self.apply(MarkdownMode::Link),
                ComposerShortcut::LineBreak => self.insert_text("\n"),
                ComposerShortcut::Suppressed => {}
            }
            return ComposerAction::Handled;
        }

        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if plain => {
                let mut buf = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut buf));
                ComposerAction::Handled
            }
            KeyCode::Backspace => {
                self.delete_backward();
                ComposerAction::Handled
            }
            KeyCode::Left => {
                self.set_caret(self.previous_boundary(self.selection_end));
                ComposerAction::Handled
            }
            KeyCode::Right => {
                self.set_caret(self.next_boundary(self.selection_end));
                ComposerAction::Handled
            }
            _ => ComposerAction::Ignored,
        }
    }

    /// Validates the modal and builds the forward request.
    ///
    /// Failures are kept as the inline error and also returned.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError` when no channel is selected, posting there is
    /// not allowed, or the comment exceeds the character limit.
    pub fn submit(&mut self) -> Result<ForwardRequest, ForwardError> {
        let result = self.build_request();
        match &result {
            Ok(request) => {
                info!(post = %request.post_id, channel = %request.channel_id, "forwarding post");
                self.post_error = None;
            }
            Err(e) => {
                debug!(error = %e, "forward rejected");
                self.post_error = Some(e.clone());
            }
        }
        result
    }

    fn build_request(&self) -> Result<ForwardRequest, ForwardError> {
        let Some(selected) = &self.selected else {
            return Err(ForwardError::NoChannelSelected);
        };
        if !self.can_post_in_selected {
            return Err(ForwardError::permission_denied(&selected.label));
        }
        self.check_length()?;

        Ok(ForwardRequest {
            post_id: self.post_id.clone(),
            channel_id: selected.value.clone(),
            comment: self.comment.trim().to_string(),
        })
    }

    fn check_length(&self) -> Result<(), ForwardError> {
        let length = self.comment.chars().count();
        if length > self.max_post_size {
            return Err(ForwardError::MessageTooLong {
                length,
                max: self.max_post_size,
            });
        }
        Ok(())
    }

    fn validate_length(&mut self) {
        match self.check_length() {
            Err(e) => self.post_error = Some(e),
            Ok(()) => {
                if self.post_error.as_ref().is_some_and(ForwardError::is_comment_error) {
                    self.post_error = None;
                }
            }
        }
    }

    fn apply(&mut self, mode: MarkdownMode) {
        let edit = apply_markdown(mode, self.selection_start, self.selection_end, &self.comment);
        self.comment = edit.message;
        self.set_selection(edit.selection_start, edit.selection_end);
        self.validate_length();
    }

    fn delete_backward(&mut self) {
        let (start, end) = self.ordered_selection();
        if start == end {
            if start == 0 {
                return;
            }
            let previous = self.previous_boundary(start);
            self.comment.replace_range(previous..start, "");
            self.selection_start = previous;
        } else {
            self.comment.replace_range(start..end, "");
            self.selection_start = start;
        }
        self.selection_end = self.selection_start;
        self.validate_length();
    }

    fn ordered_selection(&self) -> (usize, usize) {
        if self.selection_start <= self.selection_end {
            (self.selection_start, self.selection_end)
        } else {
            (self.selection_end, self.selection_start)
        }
    }

    fn previous_boundary(&self, index: usize) -> usize {
        self.comment[..index]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self, index: usize) -> usize {
        self.comment[index..]
            .chars()
            .next()
            .map_or(index, |c| index + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ChannelKind};

    fn store() -> StoreSnapshot {
        let mut store = StoreSnapshot::new("me");
        store.current_channel_id = Some("here".into());
        store.grant(&"here".into(), Permissions::USE_CHANNEL_MENTIONS);
        store.grant(&"open".into(), Permissions::CREATE_POST);
        store.config.max_post_size = 10;
        store.views.connection_error_count = 2;
        store
    }

    fn option(id: &str) -> ChannelOption {
        ChannelOption::from(Channel::new(id, id, ChannelKind::Open).with_display_name(id.to_uppercase()))
    }

    fn modal(store: &StoreSnapshot) -> ForwardPostModal {
        ForwardPostModal::new(store, &Post::new("p1", "here", "u1", 1))
    }

    fn ready_modal() -> ForwardPostModal {
        let store = store();
        let mut modal = modal(&store);
        modal.select_channel(&store, option("open"));
        modal
    }

    #[test]
    fn test_initial_state_reads_store() {
        let store = store();
        let modal = modal(&store);

        assert!(!modal.can_post());
        assert!(modal.use_channel_mentions());
        assert!(modal.bad_connection());
        assert_eq!(modal.max_post_size(), 10);
        assert!(modal.post_error().is_none());
    }

    #[test]
    fn test_submit_without_channel() {
        let store = store();
        let mut modal = modal(&store);

        assert_eq!(modal.submit(), Err(ForwardError::NoChannelSelected));
        assert_eq!(modal.post_error(), Some(&ForwardError::NoChannelSelected));
    }

    #[test]
    fn test_submit_without_permission() {
        let store = store();
        let mut modal = modal(&store);
        modal.select_channel(&store, option("readonly"));

        assert!(!modal.can_post());
        assert_eq!(
            modal.submit(),
            Err(ForwardError::permission_denied("READONLY"))
        );
    }

    #[test]
    fn test_too_long_comment_is_inline_error() {
        let mut modal = ready_modal();

        modal.set_comment("this is far too long");
        assert!(matches!(
            modal.post_error(),
            Some(ForwardError::MessageTooLong { length: 20, max: 10 })
        ));
        assert!(modal.submit().is_err());

        modal.set_comment("short");
        assert!(modal.post_error().is_none());
        let request = modal.submit().unwrap();
        assert_eq!(request.comment, "short");
        assert_eq!(request.channel_id, ChannelId::from("open"));
        assert_eq!(request.post_id, PostId::from("p1"));
    }

    #[test]
    fn test_typing_and_bold_shortcut() {
        let mut modal = ready_modal();
        for c in "hi yo".chars() {
            modal.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        modal.set_selection(3, 5);

        let action = modal.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));

        assert_eq!(action, ComposerAction::Handled);
        assert_eq!(modal.comment(), "hi **yo**");
        assert_eq!(modal.selection(), (5, 7));
    }

    #[test]
    fn test_enter_does_not_submit_but_shift_enter_breaks_line() {
        let mut modal = ready_modal();
        modal.set_comment("a");

        assert_eq!(modal.handle_key(KeyEvent::from(KeyCode::Enter)), ComposerAction::Ignored);
        modal.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));

        assert_eq!(modal.comment(), "a\n");
    }

    #[test]
    fn test_disabled_composer_ignores_keys() {
        let store = store();
        let mut modal = modal(&store);

        let action = modal.handle_key(KeyEvent::from(KeyCode::Char('x')));

        assert_eq!(action, ComposerAction::Ignored);
        assert!(modal.comment().is_empty());
    }

    #[test]
    fn test_backspace_and_caret_movement_respect_multibyte() {
        let mut modal = ready_modal();
        modal.set_comment("añb");

        modal.handle_key(KeyEvent::from(KeyCode::Left));
        modal.handle_key(KeyEvent::from(KeyCode::Backspace));

        assert_eq!(modal.comment(), "ab");
        assert_eq!(modal.caret_position(), 1);

        modal.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(modal.caret_position(), 2);
    }
}
