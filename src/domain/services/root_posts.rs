//! Root post filtering.

use std::collections::HashSet;

use crate::domain::entities::{ChannelId, PostId};
use crate::domain::store::PostStore;

/// Returns the IDs of every non-deleted root post in `channel_id`.
///
/// Replies, deleted posts and posts of other channels are excluded. The
/// result has set semantics; an empty store yields an empty set.
#[must_use]
pub fn root_post_ids<S: PostStore + ?Sized>(store: &S, channel_id: &ChannelId) -> HashSet<PostId> {
    store
        .all_posts()
        .filter(|post| post.is_root() && post.channel_id() == channel_id && !post.is_deleted())
        .map(|post| post.id().clone())
        .collect()
}
