//! Loading store snapshots from JSON files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::domain::store::StoreSnapshot;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no snapshot given; pass --snapshot or set `snapshot` in the config")]
    Missing,
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a snapshot and marks its posts as freshly loaded.
///
/// # Errors
///
/// Returns `SnapshotError` if the file cannot be read or is not a valid
/// snapshot.
pub async fn load_snapshot(path: &Path) -> Result<StoreSnapshot, SnapshotError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut store = parse_snapshot(&content).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    store.touch();

    info!(path = ?path, channels = store.channels().count(), "loaded store snapshot");
    Ok(store)
}

/// Parses snapshot JSON.
///
/// # Errors
///
/// Returns the JSON error when `content` is not a valid snapshot.
pub fn parse_snapshot(content: &str) -> Result<StoreSnapshot, serde_json::Error> {
    serde_json::from_str(content)
}
