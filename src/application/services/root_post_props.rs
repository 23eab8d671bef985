//! Properties of the root post shown at the top of the thread sidebar.

use serde::Serialize;

use crate::domain::entities::{MessageDisplay, Post, TeamId};
use crate::domain::store::StoreSnapshot;

/// Everything the thread sidebar's root post reads from the store.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootPostProps {
    pub is_bot: bool,
    pub enable_emoji_picker: bool,
    pub enable_post_username_override: bool,
    pub is_embed_visible: bool,
    pub is_read_only: bool,
    pub team_id: Option<TeamId>,
    pub channel_is_archived: bool,
    pub is_flagged: bool,
    pub compact_display: bool,
    pub colorize_usernames: bool,
    pub collapsed_threads_enabled: bool,
    pub one_click_reactions_enabled: bool,
    /// Only filled when one-click reactions are enabled.
    pub recent_emojis: Vec<String>,
    pub is_expanded: bool,
    pub is_post_being_edited: bool,
    pub is_mobile_view: bool,
}

impl RootPostProps {
    /// Derives the props for `post`. `team_id` overrides the current team.
    #[must_use]
    pub fn from_store(store: &StoreSnapshot, post: &Post, team_id: Option<&TeamId>) -> Self {
        let prefs = &store.preferences;
        let is_bot = store.user(post.user_id()).is_some_and(|user| user.is_bot());
        let channel_is_archived = store
            .channel(post.channel_id())
            .is_some_and(|channel| channel.is_archived());

        let recent_emojis = if prefs.one_click_reactions {
            store.recent_emojis.clone()
        } else {
            Vec::new()
        };

        Self {
            is_bot,
            enable_emoji_picker: store.config.enable_emoji_picker,
            enable_post_username_override: store.config.enable_post_username_override,
            is_embed_visible: !store.views.hidden_embeds.contains(post.id()),
            is_read_only: false,
            team_id: team_id.or(store.current_team_id.as_ref()).cloned(),
            channel_is_archived,
            is_flagged: prefs.is_flagged(post.id()),
            compact_display: prefs.message_display == MessageDisplay::Compact,
            colorize_usernames: prefs.colorize_usernames,
            collapsed_threads_enabled: prefs.collapsed_threads,
            one_click_reactions_enabled: prefs.one_click_reactions,
            recent_emojis,
            is_expanded: store.views.rhs_expanded,
            is_post_being_edited: store.views.rhs_editing_post.as_ref() == Some(post.id()),
            is_mobile_view: store.views.mobile_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ChannelKind, User};

    fn store() -> StoreSnapshot {
        let mut store = StoreSnapshot::new("me");
        store.current_team_id = Some("t1".into());
        store.insert_user(User::new("bot", "helper").bot(true));
        store.insert_channel(Channel::new("c1", "archive", ChannelKind::Open).archived_at(9));
        store.recent_emojis = vec!["+1".into(), "tada".into()];
        store
    }

    #[test]
    fn test_defaults_from_store() {
        let store = store();
        let post = Post::new("p1", "c1", "bot", 1);

        let props = RootPostProps::from_store(&store, &post, None);

        assert!(props.is_bot);
        assert!(props.channel_is_archived);
        assert!(props.is_embed_visible);
        assert!(!props.is_read_only);
        assert!(!props.is_flagged);
        assert!(!props.compact_display);
        assert_eq!(props.team_id, Some(TeamId::from("t1")));
        assert_eq!(props.recent_emojis, vec!["+1".to_string(), "tada".to_string()]);
    }

    #[test]
    fn test_preferences_and_view_flags() {
        let mut store = store();
        store.preferences.one_click_reactions = false;
        store.preferences.message_display = MessageDisplay::Compact;
        store.preferences.flagged_posts.insert("p1".into());
        store.views.hidden_embeds.insert("p1".into());
        store.views.rhs_editing_post = Some("p1".into());
        let post = Post::new("p1", "c1", "someone", 1);
        let team = TeamId::from("t2");

        let props = RootPostProps::from_store(&store, &post, Some(&team));

        assert!(!props.is_bot);
        assert!(props.recent_emojis.is_empty());
        assert!(props.compact_display);
        assert!(props.is_flagged);
        assert!(!props.is_embed_visible);
        assert!(props.is_post_being_edited);
        assert_eq!(props.team_id, Some(team));
    }
}
