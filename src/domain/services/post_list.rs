//! Turning a channel's raw post IDs into timeline rows.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{PostId, UserId};
use crate::domain::store::PostStore;

/// A row of the channel timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostListItem {
    Post(PostId),
    /// Start of a calendar day (UTC).
    DateSeparator(NaiveDate),
    /// Marker above the first message the user has not seen.
    NewMessagesLine,
}

impl PostListItem {
    #[must_use]
    pub const fn post_id(&self) -> Option<&PostId> {
        match self {
            Self::Post(id) => Some(id),
            Self::DateSeparator(_) | Self::NewMessagesLine => None,
        }
    }
}

/// Inputs controlling which rows are produced.
#[derive(Debug, Clone)]
pub struct PostListOptions<'a> {
    pub current_user_id: &'a UserId,
    /// Where to draw the new-messages line; `None` draws no line.
    pub last_viewed_at: Option<i64>,
    pub collapsed_threads: bool,
    pub show_join_leave: bool,
    pub show_date_separators: bool,
}

/// Builds timeline rows from post IDs ordered newest first.
///
/// The result is ordered newest first as well. Unknown IDs are dropped,
/// replies are hidden in collapsed-threads mode and join/leave notices are
/// hidden when disabled. Date separators and the new-messages line sit on
/// the older side of the post they introduce.
#[must_use]
pub fn prepare_post_ids_for_post_list<S: PostStore + ?Sized>(
    store: &S,
    post_ids: &[PostId],
    options: &PostListOptions<'_>,
) -> Vec<PostListItem> {
    let mut items = Vec::with_capacity(post_ids.len() + 4);
    let mut last_date: Option<NaiveDate> = None;
    let mut added_new_messages_line = false;

    for id in post_ids.iter().rev() {
        let Some(post) = store.post(id) else {
            continue;
        };

        if options.collapsed_threads && !post.is_root() {
            continue;
        }
        if !options.show_join_leave && post.kind().is_join_leave() {
            continue;
        }

        if options.show_date_separators {
            let date = DateTime::from_timestamp_millis(post.create_at()).map(|dt| dt.date_naive());
            if let Some(date) = date
                && last_date != Some(date)
            {
                items.push(PostListItem::DateSeparator(date));
                last_date = Some(date);
            }
        }

        if !added_new_messages_line
            && let Some(last_viewed_at) = options.last_viewed_at
            && post.create_at() > last_viewed_at
            && post.user_id() != options.current_user_id
        {
            items.push(PostListItem::NewMessagesLine);
            added_new_messages_line = true;
        }

        items.push(PostListItem::Post(id.clone()));
    }

    items.reverse();
    items
}
