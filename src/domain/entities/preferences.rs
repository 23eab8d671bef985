//! Display preferences and server settings read by the view connectors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::PostId;

/// Where the channel view starts scrolling when entering a channel with unreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreadScrollPosition {
    /// Open at the first unread message.
    #[default]
    StartFromLeftOff,
    /// Open at the newest message.
    StartFromNewest,
}

/// Message list density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDisplay {
    #[default]
    Clean,
    Compact,
}

/// Per-user display preferences.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Hide replies from the channel timeline.
    #[serde(default)]
    pub collapsed_threads: bool,

    #[serde(default)]
    pub unread_scroll_position: UnreadScrollPosition,

    #[serde(default)]
    pub message_display: MessageDisplay,

    #[serde(default = "default_true")]
    pub colorize_usernames: bool,

    #[serde(default = "default_true")]
    pub one_click_reactions: bool,

    /// Show join/leave notices in the timeline.
    #[serde(default = "default_true")]
    pub join_leave_messages: bool,

    #[serde(default)]
    pub flagged_posts: HashSet<PostId>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            collapsed_threads: false,
            unread_scroll_position: UnreadScrollPosition::default(),
            message_display: MessageDisplay::default(),
            colorize_usernames: true,
            one_click_reactions: true,
            join_leave_messages: true,
            flagged_posts: HashSet::new(),
        }
    }
}

impl Preferences {
    #[must_use]
    pub fn is_flagged(&self, post_id: &PostId) -> bool {
        self.flagged_posts.contains(post_id)
    }
}

/// Character limit used when the server does not advertise one.
pub const DEFAULT_CHARACTER_LIMIT: usize = 16383;

/// Server-wide settings relevant to the client views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Maximum post length in characters; zero means unset.
    #[serde(default)]
    pub max_post_size: usize,

    #[serde(default = "default_true")]
    pub enable_emoji_picker: bool,

    #[serde(default)]
    pub enable_post_username_override: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_post_size: 0,
            enable_emoji_picker: true,
            enable_post_username_override: false,
        }
    }
}

impl ServerConfig {
    /// Effective maximum post length.
    #[must_use]
    pub const fn character_limit(&self) -> usize {
        if self.max_post_size == 0 {
            DEFAULT_CHARACTER_LIMIT
        } else {
            self.max_post_size
        }
    }
}

fn default_true() -> bool {
    true
}
