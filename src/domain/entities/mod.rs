//! Domain entity definitions.

mod channel;
mod permissions;
mod post;
mod preferences;
mod team;
mod user;

pub use channel::{Channel, ChannelId, ChannelKind};
pub use permissions::Permissions;
pub use post::{Post, PostId, PostKind, PostState};
pub use preferences::{
    DEFAULT_CHARACTER_LIMIT, MessageDisplay, Preferences, ServerConfig, UnreadScrollPosition,
};
pub use team::{Team, TeamId};
pub use user::{User, UserId};
