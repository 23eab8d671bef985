//! Domain layer with entities, the store snapshot and pure view derivations.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Composer keyboard shortcuts.
pub mod keybinding;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Pure derivations over the store.
pub mod services;
/// Store snapshot and post access.
pub mod store;

pub use errors::ForwardError;
pub use ports::ChannelSearchPort;
pub use store::{PostStore, StoreSnapshot};
