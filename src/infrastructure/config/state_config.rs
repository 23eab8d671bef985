use serde::{Deserialize, Serialize};

/// Session state persisted between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Channels forwarded to, most recent first.
    #[serde(default)]
    pub recent_forward_channels: Vec<String>,
}

impl StateConfig {
    /// Moves `channel_id` to the front, keeping at most `limit` entries.
    pub fn record_forward(&mut self, channel_id: &str, limit: usize) {
        self.recent_forward_channels.retain(|id| id != channel_id);
        self.recent_forward_channels.insert(0, channel_id.to_string());
        self.recent_forward_channels.truncate(limit);
    }
}
