//! Fuzzy channel search over a store snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::domain::entities::{Channel, ChannelId};
use crate::domain::ports::ChannelSearchPort;
use crate::domain::store::StoreSnapshot;

/// A service that performs fuzzy searching using the Skim algorithm.
#[derive(Clone)]
pub struct FuzzySearcher {
    matcher: Arc<SkimMatcherV2>,
}

impl Default for FuzzySearcher {
    fn default() -> Self {
        Self {
            matcher: Arc::new(SkimMatcherV2::default().ignore_case()),
        }
    }
}

impl FuzzySearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self, choice: &str, pattern: &str) -> Option<i64> {
        self.matcher.fuzzy_match(choice, pattern)
    }
}

/// Channel search served from the channels of a snapshot.
pub struct StoreChannelSearch {
    /// Channel and the text it is matched against.
    channels: Vec<(Channel, String)>,
    recent: Vec<Channel>,
    searcher: FuzzySearcher,
}

impl StoreChannelSearch {
    /// Indexes the snapshot's channels.
    ///
    /// `extra_recent` lists channel ids to offer first (e.g. recent forward
    /// destinations), ahead of the snapshot's recently viewed channels.
    #[must_use]
    pub fn from_store(store: &StoreSnapshot, extra_recent: &[ChannelId]) -> Self {
        let mut channels: Vec<(Channel, String)> = store
            .channels()
            .map(|channel| (channel.clone(), search_text(store, channel)))
            .collect();
        channels.sort_by(|a, b| a.0.label().cmp(b.0.label()));

        let mut recent: Vec<Channel> = Vec::new();
        for id in extra_recent.iter().chain(&store.recent_channels) {
            if recent.iter().any(|channel| channel.id() == id) {
                continue;
            }
            if let Some(channel) = store.channel(id) {
                recent.push(channel.clone());
            }
        }

        Self {
            channels,
            recent,
            searcher: FuzzySearcher::new(),
        }
    }
}

fn search_text(store: &StoreSnapshot, channel: &Channel) -> String {
    let teammate = channel
        .teammate_id()
        .and_then(|id| store.user(id))
        .map(|user| user.username());

    match teammate {
        Some(username) => format!("{} {} {}", channel.label(), channel.name(), username),
        None => format!("{} {}", channel.label(), channel.name()),
    }
}

#[async_trait]
impl ChannelSearchPort for StoreChannelSearch {
    async fn search(&self, term: &str) -> Vec<Channel> {
        let term = term.trim();
        if term.is_empty() {
            return self.recent.clone();
        }

        let mut scored: Vec<(i64, &Channel)> = self
            .channels
            .iter()
            .filter_map(|(channel, text)| {
                self.searcher.score(text, term).map(|score| (score, channel))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, channel)| channel.clone()).collect()
    }

    async fn recent_channels(&self) -> Vec<Channel> {
        self.recent.clone()
    }
}
