//! Token storage port
//!
//! Defines the interface for credential persistence. The refresh and
//! augmentation logic is storage-agnostic; platform adapters (in-memory,
//! file-backed) are supplied at client construction.

use async_trait::async_trait;
use ascend_domain::CredentialPair;

/// Errors that can occur during credential storage operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenStorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the credential pair.
///
/// Every read is asynchronous: request augmentation suspends until the
/// stored token has been retrieved.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Loads the stored credentials, or `None` when the user is signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn load(&self) -> Result<Option<CredentialPair>, TokenStorageError>;

    /// Replaces the stored credentials wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn store(&self, credentials: &CredentialPair) -> Result<(), TokenStorageError>;

    /// Removes any stored credentials. A no-op when none exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn clear(&self) -> Result<(), TokenStorageError>;
}

#[async_trait]
impl<S: TokenStorage + ?Sized> TokenStorage for std::sync::Arc<S> {
    async fn load(&self) -> Result<Option<CredentialPair>, TokenStorageError> {
        (**self).load().await
    }

    async fn store(&self, credentials: &CredentialPair) -> Result<(), TokenStorageError> {
        (**self).store(credentials).await
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        (**self).clear().await
    }
}
