//! Read-only snapshot of the client store.
//!
//! The snapshot is populated elsewhere (network layer, persisted cache, or a
//! JSON fixture) and the view logic only ever reads from it. The few mutators
//! exist so callers can model incoming events; each one that touches posts
//! moves [`StoreSnapshot::posts_version`] to a fresh generation, which
//! memoized selectors key on.
//!
//! Generations come from one process-wide counter, so two snapshots only
//! share a version when one is an unmodified clone of the other.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Channel, ChannelId, Permissions, Post, PostId, Preferences, ServerConfig, Team, TeamId, User,
    UserId,
};

static POSTS_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_posts_generation() -> u64 {
    POSTS_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Read access to posts, independent of where they live.
pub trait PostStore {
    /// Looks up a single post.
    fn post(&self, id: &PostId) -> Option<&Post>;

    /// Iterates over every known post, in no particular order.
    fn all_posts(&self) -> impl Iterator<Item = &Post>;

    /// Post IDs loaded for a channel, newest first.
    fn post_ids_in_channel(&self, channel_id: &ChannelId) -> Option<&[PostId]>;

    /// Identity of the current post data. Changes whenever any post is added
    /// or modified and never repeats across diverged stores.
    fn posts_version(&self) -> u64;
}

/// Per-channel read position of the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPosition {
    /// Last time the user viewed the channel, in milliseconds.
    #[serde(default)]
    pub last_viewed_at: i64,
    /// Set by an explicit "mark as unread" action.
    #[serde(default)]
    pub manually_unread: bool,
    /// Unread messages the server reports for the channel.
    #[serde(default)]
    pub unread_count: usize,
}

/// Transient view flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFlags {
    #[serde(default)]
    pub connection_error_count: u32,
    #[serde(default)]
    pub rhs_expanded: bool,
    #[serde(default)]
    pub rhs_editing_post: Option<PostId>,
    #[serde(default)]
    pub mobile_view: bool,
    /// Posts whose link embeds the user collapsed.
    #[serde(default)]
    pub hidden_embeds: HashSet<PostId>,
}

/// Everything the view connectors read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub current_user_id: UserId,
    #[serde(default)]
    pub current_team_id: Option<TeamId>,
    #[serde(default)]
    pub current_channel_id: Option<ChannelId>,

    #[serde(default)]
    posts: HashMap<PostId, Post>,
    #[serde(default)]
    posts_in_channel: HashMap<ChannelId, Vec<PostId>>,

    #[serde(default)]
    channels: HashMap<ChannelId, Channel>,
    #[serde(default)]
    users: HashMap<UserId, User>,
    /// Teams the current user is a member of.
    #[serde(default)]
    pub my_teams: Vec<Team>,

    #[serde(default)]
    pub positions: HashMap<ChannelId, ChannelPosition>,
    #[serde(default)]
    pub my_permissions: HashMap<ChannelId, Permissions>,

    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub config: ServerConfig,

    /// Most recently viewed channels, most recent first.
    #[serde(default)]
    pub recent_channels: Vec<ChannelId>,
    #[serde(default)]
    pub recent_emojis: Vec<String>,

    #[serde(default)]
    pub views: ViewFlags,

    #[serde(skip, default = "next_posts_generation")]
    posts_version: u64,
}

impl StoreSnapshot {
    /// Creates an empty snapshot for the given user.
    #[must_use]
    pub fn new(current_user_id: impl Into<UserId>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            current_team_id: None,
            current_channel_id: None,
            posts: HashMap::new(),
            posts_in_channel: HashMap::new(),
            channels: HashMap::new(),
            users: HashMap::new(),
            my_teams: Vec::new(),
            positions: HashMap::new(),
            my_permissions: HashMap::new(),
            preferences: Preferences::default(),
            config: ServerConfig::default(),
            recent_channels: Vec::new(),
            recent_emojis: Vec::new(),
            views: ViewFlags::default(),
            posts_version: next_posts_generation(),
        }
    }

    /// Adds or replaces a post.
    ///
    /// New posts are placed at the head of their channel's list, which is
    /// ordered newest first.
    pub fn receive_post(&mut self, post: Post) {
        let ids = self
            .posts_in_channel
            .entry(post.channel_id().clone())
            .or_default();
        if !ids.contains(post.id()) {
            let at = ids
                .iter()
                .position(|id| {
                    self.posts
                        .get(id)
                        .is_some_and(|existing| existing.create_at() <= post.create_at())
                })
                .unwrap_or(ids.len());
            ids.insert(at, post.id().clone());
        }
        self.posts.insert(post.id().clone(), post);
        self.posts_version = next_posts_generation();
    }

    /// Marks a post as deleted. Returns false if the post is unknown.
    pub fn delete_post(&mut self, id: &PostId) -> bool {
        let Some(post) = self.posts.get_mut(id) else {
            return false;
        };
        post.mark_deleted();
        self.posts_version = next_posts_generation();
        true
    }

    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id().clone(), channel);
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id().clone(), user);
    }

    #[must_use]
    pub fn channel(&self, id: &ChannelId) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    #[must_use]
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.my_teams.iter().find(|team| &team.id == id)
    }

    #[must_use]
    pub fn current_channel(&self) -> Option<&Channel> {
        self.current_channel_id
            .as_ref()
            .and_then(|id| self.channels.get(id))
    }

    /// Read position for a channel; unknown channels read as never viewed.
    #[must_use]
    pub fn position(&self, channel_id: &ChannelId) -> ChannelPosition {
        self.positions.get(channel_id).cloned().unwrap_or_default()
    }

    pub fn set_last_viewed(&mut self, channel_id: &ChannelId, at: i64) {
        self.positions
            .entry(channel_id.clone())
            .or_default()
            .last_viewed_at = at;
    }

    pub fn set_manually_unread(&mut self, channel_id: &ChannelId, unread: bool) {
        self.positions
            .entry(channel_id.clone())
            .or_default()
            .manually_unread = unread;
    }

    pub fn set_unread_count(&mut self, channel_id: &ChannelId, count: usize) {
        self.positions
            .entry(channel_id.clone())
            .or_default()
            .unread_count = count;
    }

    #[must_use]
    pub fn permissions_in(&self, channel_id: &ChannelId) -> Permissions {
        self.my_permissions
            .get(channel_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn grant(&mut self, channel_id: &ChannelId, permissions: Permissions) {
        *self.my_permissions.entry(channel_id.clone()).or_default() |= permissions;
    }

    /// Moves to a fresh post version, e.g. after loading a snapshot from disk.
    pub fn touch(&mut self) {
        self.posts_version = next_posts_generation();
    }
}

impl PostStore for StoreSnapshot {
    fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }

    fn all_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    fn post_ids_in_channel(&self, channel_id: &ChannelId) -> Option<&[PostId]> {
        self.posts_in_channel.get(channel_id).map(Vec::as_slice)
    }

    fn posts_version(&self) -> u64 {
        self.posts_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_post_keeps_newest_first() {
        let mut store = StoreSnapshot::new("me");
        store.receive_post(Post::new("a", "c1", "u1", 10));
        store.receive_post(Post::new("c", "c1", "u1", 30));
        store.receive_post(Post::new("b", "c1", "u1", 20));

        let ids: Vec<&str> = store
            .post_ids_in_channel(&"c1".into())
            .unwrap()
            .iter()
            .map(PostId::as_str)
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_mutations_bump_version() {
        let mut store = StoreSnapshot::new("me");
        let v0 = store.posts_version();

        store.receive_post(Post::new("a", "c1", "u1", 10));
        let v1 = store.posts_version();
        assert!(v1 > v0);

        assert!(store.delete_post(&"a".into()));
        assert!(store.posts_version() > v1);
        assert!(store.post(&"a".into()).unwrap().is_deleted());

        let v2 = store.posts_version();
        assert!(!store.delete_post(&"missing".into()));
        assert_eq!(store.posts_version(), v2);
    }

    #[test]
    fn test_diverged_clones_get_distinct_versions() {
        let mut a = StoreSnapshot::new("me");
        a.receive_post(Post::new("p1", "c1", "u1", 10));
        let mut b = a.clone();
        assert_eq!(a.posts_version(), b.posts_version());

        a.receive_post(Post::new("p2", "c1", "u1", 20));
        b.receive_post(Post::new("p3", "c1", "me", 20));

        assert_ne!(a.posts_version(), b.posts_version());
    }

    #[test]
    fn test_deserialized_snapshots_get_distinct_versions() {
        let json = r#"{"current_user_id": "me"}"#;
        let first: StoreSnapshot = serde_json::from_str(json).unwrap();
        let second: StoreSnapshot = serde_json::from_str(json).unwrap();

        assert_ne!(first.posts_version(), second.posts_version());
        assert_ne!(first.posts_version(), StoreSnapshot::new("me").posts_version());
    }

    #[test]
    fn test_replacing_post_does_not_duplicate_id() {
        let mut store = StoreSnapshot::new("me");
        store.receive_post(Post::new("a", "c1", "u1", 10));
        store.receive_post(Post::new("a", "c1", "u1", 10).with_message("edited"));

        assert_eq!(store.post_ids_in_channel(&"c1".into()).unwrap().len(), 1);
        assert_eq!(store.post(&"a".into()).unwrap().message(), "edited");
    }

    #[test]
    fn test_unknown_channel_position_defaults() {
        let store = StoreSnapshot::new("me");
        let position = store.position(&"nowhere".into());
        assert_eq!(position.last_viewed_at, 0);
        assert!(!position.manually_unread);
    }
}
