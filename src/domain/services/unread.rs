//! Counting unread posts below the last viewed point.

use crate::domain::entities::{PostId, UserId};
use crate::domain::store::PostStore;

/// Counts posts in `post_ids` that the current user has not seen yet.
///
/// A post counts when it is not deleted, was written by someone other than
/// `current_user_id`, was created strictly after `last_viewed_at`, and, when
/// `collapsed_threads` is set, is a root post. IDs with no matching post are
/// skipped. `None` or an empty sequence counts as zero.
#[must_use]
pub fn count_unreads_below<'a, S, I>(
    store: &S,
    post_ids: Option<I>,
    current_user_id: &UserId,
    last_viewed_at: i64,
    collapsed_threads: bool,
) -> usize
where
    S: PostStore + ?Sized,
    I: IntoIterator<Item = &'a PostId>,
{
    let Some(post_ids) = post_ids else {
        return 0;
    };

    post_ids
        .into_iter()
        .filter_map(|id| store.post(id))
        .filter(|post| {
            !post.is_deleted()
                && post.user_id() != current_user_id
                && post.create_at() > last_viewed_at
                && (!collapsed_threads || post.is_root())
        })
        .count()
}
