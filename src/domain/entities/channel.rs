//! Channel entity.

use serde::{Deserialize, Serialize};

use super::{TeamId, UserId};
use crate::domain::serde_utils::empty_string_as_none;

/// Unique identifier for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Channel type.
///
/// Serialized with the server's single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Public channel.
    #[default]
    #[serde(rename = "O")]
    Open,
    /// Private channel.
    #[serde(rename = "P")]
    Private,
    /// Direct message with one other user.
    #[serde(rename = "D")]
    Direct,
    /// Group message.
    #[serde(rename = "G")]
    Group,
    /// The collapsed-threads pseudo channel.
    #[serde(rename = "threads")]
    Threads,
}

impl ChannelKind {
    /// Group heading used by the channel picker.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Open => "O",
            Self::Private => "P",
            Self::Direct => "D",
            Self::Group => "G",
            Self::Threads => "threads",
        }
    }

    #[must_use]
    pub const fn is_direct_or_group(self) -> bool {
        matches!(self, Self::Direct | Self::Group)
    }
}

/// Channel information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    #[serde(default, with = "empty_string_as_none")]
    team_id: Option<TeamId>,
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(rename = "type")]
    kind: ChannelKind,
    #[serde(default)]
    delete_at: i64,
    #[serde(default)]
    shared: bool,
    /// The other member of a direct message channel.
    #[serde(default, with = "empty_string_as_none")]
    teammate_id: Option<UserId>,
}

impl Channel {
    /// Creates a channel with the given ID, name, and type.
    #[must_use]
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            team_id: None,
            name: name.into(),
            display_name: String::new(),
            kind,
            delete_at: 0,
            shared: false,
            teammate_id: None,
        }
    }

    #[must_use]
    pub fn with_team(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_teammate(mut self, user_id: impl Into<UserId>) -> Self {
        self.teammate_id = Some(user_id.into());
        self
    }

    /// Marks the channel as archived at the given time.
    #[must_use]
    pub const fn archived_at(mut self, delete_at: i64) -> Self {
        self.delete_at = delete_at;
        self
    }

    #[must_use]
    pub const fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    #[must_use]
    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    #[must_use]
    pub fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.shared
    }

    #[must_use]
    pub fn teammate_id(&self) -> Option<&UserId> {
        self.teammate_id.as_ref()
    }

    /// Returns true if the channel has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.delete_at > 0
    }

    /// Display name, falling back to the URL name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
