use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::schema::Setting;
use crate::value::{normalize, Value};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence seam for the editor's value tree.
///
/// The tree crosses this boundary as plain JSON, so stores never need to know
/// about schemas or in-memory value shapes.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the raw snapshot, or `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<serde_json::Value>, StoreError>;

    /// Persist the snapshot, returning the save timestamp.
    async fn save(&self, snapshot: &serde_json::Value) -> Result<DateTime<Local>, StoreError>;
}

/// Snapshot store backed by a pretty-printed JSON file.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<serde_json::Value>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("STORE: no snapshot at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, snapshot: &serde_json::Value) -> Result<DateTime<Local>, StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("STORE: saved snapshot to {}", self.path.display());
        Ok(Local::now())
    }
}

/// Load a snapshot through a store and fold it into a normalized tree.
pub async fn load_tree(
    store: &dyn SnapshotStore,
    schema: &[Setting],
) -> Result<Value, StoreError> {
    let snapshot = store.load().await?;
    Ok(normalize(schema, snapshot.as_ref()))
}
