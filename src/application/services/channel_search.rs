//! Channel picker suggestions with latest-wins request coalescing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{Channel, ChannelId, ChannelKind};
use crate::domain::ports::ChannelSearchPort;

/// Label of the group shown before the user types anything.
pub const RECENT_GROUP_LABEL: &str = "Recent";

/// Group order of search results.
const GROUP_ORDER: [ChannelKind; 4] = [
    ChannelKind::Open,
    ChannelKind::Private,
    ChannelKind::Direct,
    ChannelKind::Group,
];

/// A selectable channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelOption {
    pub label: String,
    pub value: ChannelId,
    pub details: Channel,
}

impl From<Channel> for ChannelOption {
    fn from(channel: Channel) -> Self {
        Self {
            label: channel.label().to_string(),
            value: channel.id().clone(),
            details: channel,
        }
    }
}

/// Options under a common heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<ChannelOption>,
}

/// Heading for a group of search results.
#[must_use]
pub const fn group_label(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Open => "Public channels",
        ChannelKind::Private => "Private channels",
        ChannelKind::Direct => "Direct messages",
        ChannelKind::Group => "Group messages",
        ChannelKind::Threads => "Threads",
    }
}

/// Runs channel searches for a picker.
///
/// Every call to [`handle_input_change`](Self::handle_input_change) takes a
/// new sequence number. When its response arrives after a newer request was
/// issued, the response is dropped, so a slow answer to an old keystroke
/// never replaces the results of a newer one.
pub struct ChannelSearchService {
    port: Arc<dyn ChannelSearchPort>,
    latest: AtomicU64,
    recent_limit: usize,
}

impl ChannelSearchService {
    #[must_use]
    pub fn new(port: Arc<dyn ChannelSearchPort>, recent_limit: usize) -> Self {
        Self {
            port,
            latest: AtomicU64::new(0),
            recent_limit,
        }
    }

    /// Options shown before any input: recently viewed channels without
    /// threads, in one group.
    pub async fn default_options(&self) -> Vec<OptionGroup> {
        let options: Vec<ChannelOption> = self
            .port
            .recent_channels()
            .await
            .into_iter()
            .filter(|channel| channel.kind() != ChannelKind::Threads)
            .take(self.recent_limit)
            .map(ChannelOption::from)
            .collect();

        vec![OptionGroup {
            label: RECENT_GROUP_LABEL.to_string(),
            options,
        }]
    }

    /// Searches for `term`.
    ///
    /// Returns `None` when a newer search started while this one was in
    /// flight.
    pub async fn handle_input_change(&self, term: &str) -> Option<Vec<OptionGroup>> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let channels = self.port.search(term).await;

        if !self.is_latest(seq) {
            debug!(seq, term, "discarding stale channel search response");
            return None;
        }

        let groups = group_by_kind(channels);
        debug!(seq, term, groups = groups.len(), "channel search resolved");
        Some(groups)
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

/// Groups channels by kind in picker order, dropping empty groups and threads.
#[must_use]
pub fn group_by_kind(channels: Vec<Channel>) -> Vec<OptionGroup> {
    let mut groups: Vec<OptionGroup> = GROUP_ORDER
        .iter()
        .map(|kind| OptionGroup {
            label: group_label(*kind).to_string(),
            options: Vec::new(),
        })
        .collect();

    for channel in channels {
        if let Some(index) = GROUP_ORDER.iter().position(|kind| *kind == channel.kind()) {
            groups[index].options.push(ChannelOption::from(channel));
        }
    }

    groups.retain(|group| !group.options.is_empty());
    groups
}
