//! Presentation data for one entry of the channel picker.

use serde::Serialize;

use crate::domain::entities::{Channel, ChannelKind, UserId};
use crate::domain::store::StoreSnapshot;

const DEACTIVATED_SUFFIX: &str = " - Deactivated";
const CURRENT_USER_SUFFIX: &str = " (you)";

/// Leading icon of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OptionIcon {
    Archived,
    Public,
    Private,
    Threads,
    Group,
    /// Profile picture of the DM partner.
    Avatar { user_id: Option<UserId> },
}

impl OptionIcon {
    /// Single-cell glyph for terminal rendering.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Archived => "▣",
            Self::Public => "#",
            Self::Private => "🔒",
            Self::Threads => "≡",
            Self::Group => "G",
            Self::Avatar { .. } => "@",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionTag {
    Bot,
    Guest,
}

impl OptionTag {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bot => "BOT",
            Self::Guest => "GUEST",
        }
    }
}

/// Everything needed to draw one picker entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedOption {
    /// Stable element id, derived from the channel name.
    pub element_id: String,
    pub icon: OptionIcon,
    pub name: String,
    pub description: String,
    pub show_description: bool,
    pub team_name: Option<String>,
    pub tags: Vec<OptionTag>,
    pub shared: bool,
}

/// Formats `channel` for the picker from the current user's point of view.
///
/// Direct messages are labelled by the partner: a channel with a display
/// name keeps it and gets `@username` as description, otherwise the
/// username becomes the name. Deactivated partners get a suffix. Group
/// messages have no description; other channels show `~name`. Descriptions
/// are only shown to single-team users or for direct messages, and team
/// names only to multi-team users.
#[must_use]
pub fn format_option(store: &StoreSnapshot, channel: &Channel) -> FormattedOption {
    let current_user_id = &store.current_user_id;
    let single_team = store.my_teams.len() == 1;
    let kind = channel.kind();

    let teammate = channel.teammate_id().and_then(|id| store.user(id));

    let icon = if channel.is_archived() {
        OptionIcon::Archived
    } else {
        match kind {
            ChannelKind::Open => OptionIcon::Public,
            ChannelKind::Private => OptionIcon::Private,
            ChannelKind::Threads => OptionIcon::Threads,
            ChannelKind::Group => OptionIcon::Group,
            ChannelKind::Direct => OptionIcon::Avatar {
                user_id: channel.teammate_id().cloned(),
            },
        }
    };

    let mut name = channel.display_name().to_string();
    let mut description = format!("~{}", channel.name());
    let mut tags = Vec::new();

    match kind {
        ChannelKind::Direct => {
            if let Some(user) = teammate {
                if user.is_bot() {
                    tags.push(OptionTag::Bot);
                }
                if user.is_guest() {
                    tags.push(OptionTag::Guest);
                }

                let deactivated = if user.is_deactivated() {
                    DEACTIVATED_SUFFIX
                } else {
                    ""
                };

                if !channel.display_name().is_empty() && !user.is_bot() {
                    description = format!("@{}{deactivated}", user.username());
                } else {
                    name = user.username().to_string();
                    if user.id() == current_user_id {
                        name.push_str(CURRENT_USER_SUFFIX);
                    }
                    description = deactivated.to_string();
                }
            } else {
                name = channel.label().to_string();
                description = String::new();
            }
        }
        ChannelKind::Group => {
            description = String::new();
        }
        _ => {}
    }

    let team_name = channel
        .team_id()
        .and_then(|id| store.team(id))
        .map(|team| team.display_name.clone())
        .filter(|_| !single_team);

    FormattedOption {
        element_id: format!("post-forward_channel-select_{}", channel.name()),
        icon,
        name,
        show_description: (single_team || kind == ChannelKind::Direct) && !description.is_empty(),
        description,
        team_name,
        tags,
        shared: channel.is_shared(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Team, User};

    fn store(teams: usize) -> StoreSnapshot {
        let mut store = StoreSnapshot::new("me");
        store.my_teams = (0..teams)
            .map(|i| Team::new(format!("t{i}"), format!("Team {i}")))
            .collect();
        store.insert_user(User::new("me", "myself"));
        store.insert_user(User::new("u2", "bob").deactivated_at(5));
        store.insert_user(User::new("bot", "robot").bot(true));
        store.insert_user(User::new("g", "visitor").with_roles("system_guest"));
        store
    }

    #[test]
    fn test_public_channel_single_team() {
        let store = store(1);
        let channel = Channel::new("c1", "town-square", ChannelKind::Open)
            .with_display_name("Town Square")
            .with_team("t0");

        let option = format_option(&store, &channel);

        assert_eq!(option.icon, OptionIcon::Public);
        assert_eq!(option.name, "Town Square");
        assert_eq!(option.description, "~town-square");
        assert!(option.show_description);
        assert_eq!(option.team_name, None);
        assert_eq!(option.element_id, "post-forward_channel-select_town-square");
    }

    #[test]
    fn test_multi_team_shows_team_not_description() {
        let store = store(2);
        let channel = Channel::new("c1", "secret", ChannelKind::Private)
            .with_display_name("Secret")
            .with_team("t1");

        let option = format_option(&store, &channel);

        assert_eq!(option.icon, OptionIcon::Private);
        assert!(!option.show_description);
        assert_eq!(option.team_name.as_deref(), Some("Team 1"));
    }

    #[test]
    fn test_archived_icon_wins() {
        let store = store(1);
        let channel = Channel::new("c1", "old", ChannelKind::Private).archived_at(1);
        assert_eq!(format_option(&store, &channel).icon, OptionIcon::Archived);
    }

    #[test]
    fn test_dm_with_display_name_and_deactivated_partner() {
        let store = store(2);
        let channel = Channel::new("d1", "me__u2", ChannelKind::Direct)
            .with_display_name("Bob B")
            .with_teammate("u2");

        let option = format_option(&store, &channel);

        assert_eq!(option.name, "Bob B");
        assert_eq!(option.description, "@bob - Deactivated");
        assert!(option.show_description);
    }

    #[test]
    fn test_dm_with_bot_uses_username() {
        let store = store(1);
        let channel = Channel::new("d1", "me__bot", ChannelKind::Direct)
            .with_display_name("Robot")
            .with_teammate("bot");

        let option = format_option(&store, &channel);

        assert_eq!(option.name, "robot");
        assert_eq!(option.tags, vec![OptionTag::Bot]);
        assert!(!option.show_description);
    }

    #[test]
    fn test_self_dm_and_guest_tag() {
        let store = store(1);
        let own = Channel::new("d1", "me__me", ChannelKind::Direct).with_teammate("me");
        assert_eq!(format_option(&store, &own).name, "myself (you)");

        let guest = Channel::new("d2", "me__g", ChannelKind::Direct)
            .with_display_name("Visitor")
            .with_teammate("g");
        assert_eq!(format_option(&store, &guest).tags, vec![OptionTag::Guest]);
    }

    #[test]
    fn test_group_message_has_no_description() {
        let store = store(1);
        let channel = Channel::new("g1", "abc123", ChannelKind::Group).with_display_name("a, b, c");

        let option = format_option(&store, &channel);

        assert_eq!(option.icon, OptionIcon::Group);
        assert_eq!(option.name, "a, b, c");
        assert!(option.description.is_empty());
        assert!(!option.show_description);
    }
}
