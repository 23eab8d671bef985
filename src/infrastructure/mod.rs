//! Infrastructure layer: configuration, persistence and search adapters.

/// Application configuration.
pub mod config;
/// Fuzzy channel search.
pub mod search;
/// Store snapshot loading.
pub mod snapshot;

pub use config::{AppConfig, CliArgs, Command, ConfigError, LogLevel, StateConfig, StorageManager};
pub use search::{FuzzySearcher, StoreChannelSearch};
pub use snapshot::{SnapshotError, load_snapshot};
