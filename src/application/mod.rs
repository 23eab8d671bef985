//! Application layer: memoized selectors and view services.

/// Memoization for derived store data.
pub mod selectors;
/// Services backing the toast, the forward modal and post rendering.
pub mod services;

pub use selectors::MemoCache;
pub use services::{ChannelSearchService, ForwardPostModal, ToastConnector};
