//! Offline queue storage port
//!
//! The queue is persisted as a whole on every change: a JSON-encoded
//! array under a single location, mirroring how the mobile client keeps
//! it under one storage key.

use async_trait::async_trait;
use ascend_domain::QueuedRequest;

/// Errors that can occur during queue persistence.
#[derive(Debug, thiserror::Error)]
pub enum QueueStorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the offline request queue.
#[async_trait]
pub trait QueueStorage: Send + Sync {
    /// Loads all persisted entries in FIFO order. An absent store yields
    /// an empty queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn load(&self) -> Result<Vec<QueuedRequest>, QueueStorageError>;

    /// Persists the full queue, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn save(&self, entries: &[QueuedRequest]) -> Result<(), QueueStorageError>;
}

#[async_trait]
impl<Q: QueueStorage + ?Sized> QueueStorage for std::sync::Arc<Q> {
    async fn load(&self) -> Result<Vec<QueuedRequest>, QueueStorageError> {
        (**self).load().await
    }

    async fn save(&self, entries: &[QueuedRequest]) -> Result<(), QueueStorageError> {
        (**self).save(entries).await
    }
}
