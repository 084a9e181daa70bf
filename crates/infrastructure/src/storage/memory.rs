//! In-memory credential storage.
//!
//! The ephemeral analog of the web client's in-tab token store: nothing
//! survives the process. Also the storage of choice for tests.

use ascend_application::ports::{TokenStorage, TokenStorageError};
use ascend_domain::CredentialPair;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Thread-safe in-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    credentials: RwLock<Option<CredentialPair>>,
}

impl MemoryTokenStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with credentials.
    #[must_use]
    pub fn with_credentials(credentials: CredentialPair) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn load(&self) -> Result<Option<CredentialPair>, TokenStorageError> {
        Ok(self.credentials.read().await.clone())
    }

    async fn store(&self, credentials: &CredentialPair) -> Result<(), TokenStorageError> {
        *self.credentials.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        *self.credentials.write().await = None;
        Ok(())
    }
}
