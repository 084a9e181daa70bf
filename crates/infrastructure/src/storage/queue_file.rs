//! File-based offline queue storage.
//!
//! The queue is one JSON-encoded array in `<dir>/offline_queue.json`,
//! mirroring the mobile client's single storage key. Every save rewrites
//! the whole array; the queue is small by nature (requests captured
//! during an offline window).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ascend_application::ports::{QueueStorage, QueueStorageError};
use ascend_domain::QueuedRequest;
use async_trait::async_trait;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const QUEUE_FILE: &str = "offline_queue.json";

/// Offline queue store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileQueueStorage {
    path: PathBuf,
}

impl FileQueueStorage {
    /// Creates a store rooted at the given state directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(QUEUE_FILE),
        }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueueStorage for FileQueueStorage {
    async fn load(&self) -> Result<Vec<QueuedRequest>, QueueStorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        from_json_bytes(&bytes).map_err(|e| QueueStorageError::Serialization(e.to_string()))
    }

    async fn save(&self, entries: &[QueuedRequest]) -> Result<(), QueueStorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = to_json_stable_bytes(&entries)
            .map_err(|e| QueueStorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(
            path = %self.path.display(),
            pending = entries.len(),
            "offline queue persisted"
        );
        Ok(())
    }
}
