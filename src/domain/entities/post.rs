//! Post entity.

use serde::{Deserialize, Serialize};

use super::{ChannelId, UserId};
use crate::domain::serde_utils::empty_string_as_none;

/// Unique identifier for a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lifecycle state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostState {
    /// Visible post.
    #[default]
    Normal,
    /// Post removed by its author or a moderator.
    Deleted,
}

/// Post type as far as the timeline cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    /// Message written by a user.
    #[default]
    Regular,
    /// Channel join or leave notice.
    JoinLeave,
    /// Any other system message.
    System,
}

impl PostKind {
    /// Returns true for join/leave notices.
    #[must_use]
    pub const fn is_join_leave(self) -> bool {
        matches!(self, Self::JoinLeave)
    }
}

/// A message in a channel, either a root post or a threaded reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    channel_id: ChannelId,
    #[serde(default, with = "empty_string_as_none")]
    root_id: Option<PostId>,
    user_id: UserId,
    /// Creation time in milliseconds since the Unix epoch.
    create_at: i64,
    #[serde(default)]
    state: PostState,
    #[serde(default, rename = "type")]
    kind: PostKind,
    #[serde(default)]
    message: String,
}

impl Post {
    /// Creates a root post.
    #[must_use]
    pub fn new(
        id: impl Into<PostId>,
        channel_id: impl Into<ChannelId>,
        user_id: impl Into<UserId>,
        create_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            root_id: None,
            user_id: user_id.into(),
            create_at,
            state: PostState::Normal,
            kind: PostKind::Regular,
            message: String::new(),
        }
    }

    /// Makes this post a reply in the thread rooted at `root_id`.
    #[must_use]
    pub fn with_root(mut self, root_id: impl Into<PostId>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    /// Sets the message text.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the post kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the post as deleted.
    #[must_use]
    pub const fn deleted(mut self) -> Self {
        self.state = PostState::Deleted;
        self
    }

    #[must_use]
    pub fn id(&self) -> &PostId {
        &self.id
    }

    #[must_use]
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    #[must_use]
    pub fn root_id(&self) -> Option<&PostId> {
        self.root_id.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn create_at(&self) -> i64 {
        self.create_at
    }

    #[must_use]
    pub const fn state(&self) -> PostState {
        self.state
    }

    #[must_use]
    pub const fn kind(&self) -> PostKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this post starts a thread rather than replying to one.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.root_id.is_none()
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.state == PostState::Deleted
    }

    /// Transitions the post to the deleted state. There is no way back.
    pub fn mark_deleted(&mut self) {
        self.state = PostState::Deleted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_root_post_from_wire() {
        let json = r#"{
            "id": "p1",
            "channel_id": "c1",
            "root_id": "",
            "user_id": "u1",
            "create_at": 1000,
            "type": "join_leave"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_root());
        assert!(!post.is_deleted());
        assert_eq!(post.kind(), PostKind::JoinLeave);
        assert_eq!(post.channel_id().as_str(), "c1");
    }

    #[test]
    fn test_reply_and_deletion() {
        let mut post = Post::new("p2", "c1", "u1", 5).with_root("p1");
        assert!(!post.is_root());
        assert_eq!(post.root_id().map(PostId::as_str), Some("p1"));

        post.mark_deleted();
        assert_eq!(post.state(), PostState::Deleted);
    }
}
