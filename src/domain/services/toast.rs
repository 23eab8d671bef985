//! Deciding what the "new messages" toast shows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{PostId, UnreadScrollPosition};

/// Everything the toast needs to know about a channel, as derived from the
/// store by the toast connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastProps {
    /// Live root posts of the channel.
    pub root_posts: HashSet<PostId>,
    pub last_viewed_at: i64,
    /// Unread posts in the loaded window; only computed when the window
    /// does not reach the newest post.
    pub new_recent_messages_count: usize,
    pub unread_scroll_position: UnreadScrollPosition,
    pub collapsed_threads: bool,
    /// Unread count the server holds for the channel.
    pub unread_count_in_channel: usize,
    pub channel_marked_as_unread: bool,
}

/// Which message the toast carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    /// Messages arrived below the viewport.
    NewMessages,
    /// The view opened at the newest post while older unreads remain.
    UnreadSinceLastVisit,
}

/// Result of the toast decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastDecision {
    pub visible: bool,
    pub count: usize,
    pub kind: ToastKind,
}

/// Decides whether the toast is shown and which count it displays.
///
/// * A channel marked unread by hand shows the channel's stored unread count
///   and ignores anything computed from loaded posts.
/// * When the loaded window does not reach the newest post, the stored
///   unread count and the unread posts seen in the window are added.
/// * Otherwise the count is the number of posts below the viewport; in
///   collapsed-threads mode only root posts are counted.
#[must_use]
pub fn decide_toast(
    props: &ToastProps,
    at_latest_post: bool,
    posts_below_viewport: &[PostId],
) -> ToastDecision {
    let count = if props.channel_marked_as_unread {
        props.unread_count_in_channel
    } else if !at_latest_post {
        props.unread_count_in_channel + props.new_recent_messages_count
    } else if props.collapsed_threads {
        posts_below_viewport
            .iter()
            .filter(|id| props.root_posts.contains(*id))
            .count()
    } else {
        posts_below_viewport.len()
    };

    let kind = if props.unread_scroll_position == UnreadScrollPosition::StartFromNewest
        && props.unread_count_in_channel > 0
    {
        ToastKind::UnreadSinceLastVisit
    } else {
        ToastKind::NewMessages
    };

    ToastDecision {
        visible: count > 0,
        count,
        kind,
    }
}
