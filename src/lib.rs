//! teamview - view-state core of a team-messaging client.
//!
//! The crate derives what a messaging client renders from a store snapshot:
//! the unread toast with its memoized counters, the forward-post modal with
//! latest-wins channel search, the thread root post and the commands help
//! page. A small CLI renders each of them into text.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing selectors and view services.
pub mod application;
/// Domain layer containing entities, the store and pure derivations.
pub mod domain;
/// Infrastructure layer containing configuration, persistence and search.
pub mod infrastructure;
/// Presentation layer containing widgets and text rendering.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "teamview";
