//! Channel search port definition.

use async_trait::async_trait;

use crate::domain::entities::Channel;

/// Source of channel suggestions for pickers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelSearchPort: Send + Sync {
    /// Channels matching `term`, best match first.
    async fn search(&self, term: &str) -> Vec<Channel>;

    /// Recently viewed channels, most recent first.
    async fn recent_channels(&self) -> Vec<Channel>;
}
