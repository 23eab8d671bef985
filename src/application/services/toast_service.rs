//! Wires the store to the unread toast.

use std::collections::HashSet;

use tracing::debug;

use crate::application::selectors::{DEFAULT_MEMO_CAPACITY, MemoCache};
use crate::domain::entities::{ChannelId, PostId, UserId};
use crate::domain::services::{
    PostListOptions, ToastDecision, ToastProps, count_unreads_below, decide_toast,
    prepare_post_ids_for_post_list, root_post_ids,
};
use crate::domain::store::{PostStore, StoreSnapshot};

/// Properties the toast's parent view supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastOwnProps {
    pub channel_id: ChannelId,
    /// Whether the loaded window includes the newest post of the channel.
    pub at_latest_post: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RootPostsKey {
    channel_id: ChannelId,
    posts_version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct UnreadsKey {
    channel_id: ChannelId,
    posts_version: u64,
    current_user_id: UserId,
    last_viewed_at: i64,
    collapsed_threads: bool,
    show_join_leave: bool,
}

/// Derives [`ToastProps`] from the store, memoizing the expensive parts.
///
/// Root posts are cached per channel and post version. Unread counts are
/// additionally keyed on the last viewed time and the display preferences
/// that change which posts the timeline contains.
#[derive(Debug)]
pub struct ToastConnector {
    root_posts: MemoCache<RootPostsKey, HashSet<PostId>>,
    unreads_below: MemoCache<UnreadsKey, usize>,
}

impl Default for ToastConnector {
    fn default() -> Self {
        Self::new(DEFAULT_MEMO_CAPACITY)
    }
}

impl ToastConnector {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            root_posts: MemoCache::new("root_posts", capacity),
            unreads_below: MemoCache::new("count_unreads_below", capacity),
        }
    }

    /// Computes the toast properties for a channel.
    #[must_use]
    pub fn props(&self, store: &StoreSnapshot, own: &ToastOwnProps) -> ToastProps {
        let position = store.position(&own.channel_id);
        let prefs = &store.preferences;

        let new_recent_messages_count = if own.at_latest_post {
            0
        } else {
            self.recent_unreads(store, &own.channel_id, position.last_viewed_at)
        };

        let root_posts = self.root_posts.get_or_compute(
            RootPostsKey {
                channel_id: own.channel_id.clone(),
                posts_version: store.posts_version(),
            },
            || root_post_ids(store, &own.channel_id),
        );

        debug!(
            channel = %own.channel_id,
            at_latest_post = own.at_latest_post,
            new_recent_messages_count,
            unread_count = position.unread_count,
            "toast props computed"
        );

        ToastProps {
            root_posts,
            last_viewed_at: position.last_viewed_at,
            new_recent_messages_count,
            unread_scroll_position: prefs.unread_scroll_position,
            collapsed_threads: prefs.collapsed_threads,
            unread_count_in_channel: position.unread_count,
            channel_marked_as_unread: position.manually_unread,
        }
    }

    /// Computes the props and feeds them to the toast decision.
    #[must_use]
    pub fn decision(
        &self,
        store: &StoreSnapshot,
        own: &ToastOwnProps,
        posts_below_viewport: &[PostId],
    ) -> ToastDecision {
        let props = self.props(store, own);
        decide_toast(&props, own.at_latest_post, posts_below_viewport)
    }

    fn recent_unreads(&self, store: &StoreSnapshot, channel_id: &ChannelId, last_viewed_at: i64) -> usize {
        let prefs = &store.preferences;
        let key = UnreadsKey {
            channel_id: channel_id.clone(),
            posts_version: store.posts_version(),
            current_user_id: store.current_user_id.clone(),
            last_viewed_at,
            collapsed_threads: prefs.collapsed_threads,
            show_join_leave: prefs.join_leave_messages,
        };

        self.unreads_below.get_or_compute(key, || {
            let items = store.post_ids_in_channel(channel_id).map(|ids| {
                prepare_post_ids_for_post_list(
                    store,
                    ids,
                    &PostListOptions {
                        current_user_id: &store.current_user_id,
                        last_viewed_at: Some(last_viewed_at),
                        collapsed_threads: prefs.collapsed_threads,
                        show_join_leave: prefs.join_leave_messages,
                        show_date_separators: true,
                    },
                )
            });

            count_unreads_below(
                store,
                items
                    .as_ref()
                    .map(|items| items.iter().filter_map(|item| item.post_id())),
                &store.current_user_id,
                last_viewed_at,
                prefs.collapsed_threads,
            )
        })
    }
}
