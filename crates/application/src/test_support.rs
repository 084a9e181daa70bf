//! Shared test doubles for the application crate.
#![allow(clippy::unwrap_used)]

use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ascend_domain::{CredentialPair, QueuedRequest};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::ports::{
    HttpTransport, QueueStorage, QueueStorageError, TokenStorage, TokenStorageError,
    TransportError, TransportRequest, TransportResponse,
};

/// In-memory credential store.
pub struct MemoryStore {
    credentials: RwLock<Option<CredentialPair>>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            credentials: RwLock::new(None),
        }
    }

    pub fn with(credentials: CredentialPair) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl TokenStorage for MemoryStore {
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

/// In-memory offline queue store.
pub struct MemoryQueueStorage {
    entries: RwLock<Vec<QueuedRequest>>,
}

impl MemoryQueueStorage {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn with(entries: Vec<QueuedRequest>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn persisted(&self) -> Vec<QueuedRequest> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl QueueStorage for MemoryQueueStorage {
    async fn load(&self) -> Result<Vec<QueuedRequest>, QueueStorageError> {
        Ok(self.entries.read().await.clone())
    }

    async fn save(&self, entries: &[QueuedRequest]) -> Result<(), QueueStorageError> {
        *self.entries.write().await = entries.to_vec();
        Ok(())
    }
}

type Handler = Box<dyn Fn(&TransportRequest) -> Result<TransportResponse, TransportError> + Send + Sync>;

/// Scripted transport that records every request it sees.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&TransportRequest) -> Result<TransportResponse, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, path: &str) -> Vec<TransportRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.path() == path)
            .collect()
    }
}

impl HttpTransport for MockTransport {
    fn execute(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request.clone());
        let result = (self.handler)(&request);
        Box::pin(async move {
            // One scheduling tick between send and response, so concurrent
            // callers interleave the way real network calls do.
            tokio::task::yield_now().await;
            result
        })
    }
}

pub fn json_response(status: u16, body: &Value) -> TransportResponse {
    TransportResponse {
        status,
        body: serde_json::to_vec(body).unwrap(),
    }
}

pub fn empty_response(status: u16) -> TransportResponse {
    TransportResponse {
        status,
        body: Vec::new(),
    }
}

pub fn bearer(request: &TransportRequest) -> Option<String> {
    request.header("Authorization").map(ToString::to_string)
}
