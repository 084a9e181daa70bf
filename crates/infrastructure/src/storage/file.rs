//! File-based credential storage.
//!
//! Credentials are stored as deterministic JSON in
//! `<dir>/credentials.json`. This is the desktop/mobile analog of the
//! platform keychain entry: a single file owned by the client process.
//! The directory should stay out of any shared sync location.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ascend_application::ports::{TokenStorage, TokenStorageError};
use ascend_domain::CredentialPair;
use async_trait::async_trait;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const CREDENTIALS_FILE: &str = "credentials.json";

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates a store rooted at the given state directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIALS_FILE),
        }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn load(&self) -> Result<Option<CredentialPair>, TokenStorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // Absent file means signed out, not an error.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let credentials = from_json_bytes(&bytes)
            .map_err(|e| TokenStorageError::Serialization(e.to_string()))?;
        Ok(Some(credentials))
    }

    async fn store(&self, credentials: &CredentialPair) -> Result<(), TokenStorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = to_json_stable_bytes(credentials)
            .map_err(|e| TokenStorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "credentials persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "credentials removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
