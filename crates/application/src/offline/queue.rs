//! The offline request queue.
//!
//! Mutating calls attempted without connectivity are captured as
//! [`QueuedRequest`] entries and replayed later, FIFO. The queue is
//! persisted through the [`QueueStorage`] port after every change, so
//! entries survive a restart.

use ascend_domain::{HttpMethod, QueuedRequest};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ports::{HttpTransport, QueueStorage, QueueStorageError, TokenStorage};

/// Errors surfaced by queue operations.
#[derive(Debug, Error)]
pub enum OfflineQueueError {
    /// The underlying request failed in a way the queue does not absorb.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The queue could not be loaded or persisted.
    #[error("queue storage error: {0}")]
    Storage(#[from] QueueStorageError),
}

/// Outcome of [`OfflineQueue::execute_or_enqueue`].
#[derive(Debug)]
pub enum Dispatch {
    /// The request went through; the decoded response body is attached.
    Completed(Value),
    /// Connectivity was down, so the request was queued under this entry ID.
    Queued(String),
}

/// Summary of a [`OfflineQueue::replay`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    /// Entries that reached the server and succeeded.
    pub replayed: usize,
    /// Entries the server rejected; re-sending them verbatim would fail
    /// again, so they were dropped.
    pub dropped: usize,
    /// Entries still queued when the pass stopped.
    pub remaining: usize,
}

/// FIFO queue of mutating requests captured while offline.
pub struct OfflineQueue<Q> {
    storage: Q,
    entries: Mutex<Vec<QueuedRequest>>,
}

impl<Q: QueueStorage> OfflineQueue<Q> {
    /// Opens the queue, loading any entries persisted by a previous run.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted queue cannot be read.
    pub async fn open(storage: Q) -> Result<Self, OfflineQueueError> {
        let entries = storage.load().await?;
        debug!(pending = entries.len(), "offline queue opened");
        Ok(Self {
            storage,
            entries: Mutex::new(entries),
        })
    }

    /// Number of queued entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true when nothing is queued.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Snapshot of the queued entries, FIFO order.
    pub async fn entries(&self) -> Vec<QueuedRequest> {
        self.entries.lock().await.clone()
    }

    /// Appends a request to the queue and persists it.
    ///
    /// Returns the new entry's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be persisted.
    pub async fn enqueue(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<String, OfflineQueueError> {
        let entry = QueuedRequest::new(method, path, body);
        let id = entry.id.clone();

        let mut entries = self.entries.lock().await;
        entries.push(entry);
        self.storage.save(&entries).await?;
        debug!(id = %id, method = %method, path, pending = entries.len(), "request queued");
        Ok(id)
    }

    /// Attempts the request through `client`; if connectivity is down and
    /// the request is mutating, it is queued for later replay instead of
    /// failing.
    ///
    /// Read-only requests are never queued: a stale read is useless, so
    /// the network error propagates.
    ///
    /// # Errors
    ///
    /// Propagates any failure other than a connectivity loss on a
    /// mutating request.
    pub async fn execute_or_enqueue<T, S>(
        &self,
        client: &ApiClient<T, S>,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Dispatch, OfflineQueueError>
    where
        T: HttpTransport + 'static,
        S: TokenStorage + 'static,
    {
        match client.request(method, path, body.clone()).await {
            Ok(value) => Ok(Dispatch::Completed(value)),
            Err(ApiError::Network { message }) if method.is_mutating() => {
                debug!(path, %message, "offline, queueing request");
                let id = self.enqueue(method, path, body).await?;
                Ok(Dispatch::Queued(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Replays queued entries in FIFO order through `client`.
    ///
    /// Each replayed call goes through the normal client path and so gets
    /// fresh auth handling. A successful response removes the entry; a
    /// server rejection drops it (re-sending the identical request would
    /// fail again); connectivity loss or an expired session stops the
    /// pass with the current entry and everything behind it kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be persisted or the
    /// credential store fails mid-pass.
    pub async fn replay<T, S>(
        &self,
        client: &ApiClient<T, S>,
    ) -> Result<ReplayReport, OfflineQueueError>
    where
        T: HttpTransport + 'static,
        S: TokenStorage + 'static,
    {
        let mut entries = self.entries.lock().await;
        let mut replayed = 0;
        let mut dropped = 0;

        while let Some(entry) = entries.first().cloned() {
            match client
                .send_with_retry(entry.method, &entry.path, entry.body.as_ref())
                .await
            {
                Ok(response) if response.is_success() => {
                    entries.remove(0);
                    self.storage.save(&entries).await?;
                    replayed += 1;
                }
                Ok(response) => {
                    warn!(
                        id = %entry.id,
                        path = %entry.path,
                        status = response.status,
                        "dropping queued request rejected by server"
                    );
                    entries.remove(0);
                    self.storage.save(&entries).await?;
                    dropped += 1;
                }
                Err(
                    ApiError::Network { .. }
                    | ApiError::AuthExpired { .. }
                    | ApiError::RefreshTokenAbsent,
                ) => {
                    // Still offline, or the session is gone; either way
                    // later entries cannot fare better. Keep FIFO order.
                    break;
                }
                Err(err @ ApiError::Storage { .. }) => return Err(err.into()),
                Err(err) => {
                    warn!(id = %entry.id, error = %err, "dropping unreplayable queued request");
                    entries.remove(0);
                    self.storage.save(&entries).await?;
                    dropped += 1;
                }
            }
        }

        let report = ReplayReport {
            replayed,
            dropped,
            remaining: entries.len(),
        };
        debug!(?report, "replay pass finished");
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use ascend_domain::CredentialPair;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::ports::TransportError;
    use crate::test_support::{
        MemoryQueueStorage, MemoryStore, MockTransport, empty_response, json_response,
    };

    fn client(
        transport: Arc<MockTransport>,
    ) -> ApiClient<Arc<MockTransport>, Arc<MemoryStore>> {
        ApiClient::new(
            ClientConfig::new("https://api.test").unwrap(),
            transport,
            Arc::new(MemoryStore::with(CredentialPair::new("T1", "R1"))),
        )
    }

    #[tokio::test]
    async fn test_open_restores_persisted_entries() {
        let persisted = vec![
            QueuedRequest::new(HttpMethod::Post, "/api/v1/goals", Some(json!({"n": 1}))),
            QueuedRequest::new(HttpMethod::Delete, "/api/v1/goals/9", None),
        ];
        let storage = Arc::new(MemoryQueueStorage::with(persisted.clone()));
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        assert_eq!(queue.len().await, 2);
        assert_eq!(queue.entries().await, persisted);
    }

    #[tokio::test]
    async fn test_enqueue_persists_immediately() {
        let storage = Arc::new(MemoryQueueStorage::new());
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        let id = queue
            .enqueue(HttpMethod::Post, "/api/v1/goals", Some(json!({"n": 1})))
            .await
            .unwrap();

        let persisted = storage.persisted().await;
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, id);
    }

    #[tokio::test]
    async fn test_mutating_request_is_queued_when_offline() {
        let transport =
            MockTransport::new(|_| Err(TransportError::Connection("offline".to_string())));
        let client = client(transport);
        let queue = OfflineQueue::open(Arc::new(MemoryQueueStorage::new()))
            .await
            .unwrap();

        let outcome = queue
            .execute_or_enqueue(
                &client,
                HttpMethod::Post,
                "/api/v1/goals",
                Some(json!({"title": "ship it"})),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, Dispatch::Queued(_)));
        assert_eq!(queue.len().await, 1);
    }

    #[tokio::test]
    async fn test_read_request_is_never_queued() {
        let transport =
            MockTransport::new(|_| Err(TransportError::Connection("offline".to_string())));
        let client = client(transport);
        let queue = OfflineQueue::open(Arc::new(MemoryQueueStorage::new()))
            .await
            .unwrap();

        let result = queue
            .execute_or_enqueue(&client, HttpMethod::Get, "/api/v1/goals", None)
            .await;

        assert!(matches!(
            result,
            Err(OfflineQueueError::Api(ApiError::Network { .. }))
        ));
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_online_request_completes_without_queueing() {
        let transport = MockTransport::new(|_| Ok(json_response(201, &json!({"id": "g-1"}))));
        let client = client(transport);
        let queue = OfflineQueue::open(Arc::new(MemoryQueueStorage::new()))
            .await
            .unwrap();

        let outcome = queue
            .execute_or_enqueue(
                &client,
                HttpMethod::Post,
                "/api/v1/goals",
                Some(json!({"title": "ship it"})),
            )
            .await
            .unwrap();

        match outcome {
            Dispatch::Completed(value) => assert_eq!(value["id"], "g-1"),
            Dispatch::Queued(_) => panic!("request should not have been queued"),
        }
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_replay_drains_in_fifo_order() {
        let transport = MockTransport::new(|_| Ok(empty_response(200)));
        let client = client(Arc::clone(&transport));
        let storage = Arc::new(MemoryQueueStorage::with(vec![
            QueuedRequest::new(HttpMethod::Post, "/api/v1/goals", Some(json!({"n": 1}))),
            QueuedRequest::new(HttpMethod::Put, "/api/v1/goals/1", Some(json!({"n": 2}))),
            QueuedRequest::new(HttpMethod::Delete, "/api/v1/goals/2", None),
        ]));
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        let report = queue.replay(&client).await.unwrap();
        assert_eq!(
            report,
            ReplayReport {
                replayed: 3,
                dropped: 0,
                remaining: 0
            }
        );

        let paths: Vec<String> = transport
            .requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["/api/v1/goals", "/api/v1/goals/1", "/api/v1/goals/2"]
        );
        assert!(storage.persisted().await.is_empty());
    }

    #[tokio::test]
    async fn test_replay_stops_at_first_connectivity_loss() {
        let transport = MockTransport::new(|request| {
            if request.url.path() == "/api/v1/goals" {
                Ok(empty_response(200))
            } else {
                Err(TransportError::Connection("offline again".to_string()))
            }
        });
        let client = client(transport);
        let storage = Arc::new(MemoryQueueStorage::with(vec![
            QueuedRequest::new(HttpMethod::Post, "/api/v1/goals", None),
            QueuedRequest::new(HttpMethod::Put, "/api/v1/goals/1", None),
            QueuedRequest::new(HttpMethod::Delete, "/api/v1/goals/2", None),
        ]));
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        let report = queue.replay(&client).await.unwrap();
        assert_eq!(
            report,
            ReplayReport {
                replayed: 1,
                dropped: 0,
                remaining: 2
            }
        );

        // The unreplayed tail is still persisted, order intact.
        let persisted = storage.persisted().await;
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].path, "/api/v1/goals/1");
    }

    #[tokio::test]
    async fn test_replay_drops_entries_the_server_rejects() {
        let transport = MockTransport::new(|request| {
            if request.url.path() == "/api/v1/goals/gone" {
                Ok(json_response(404, &json!({"error": "not found"})))
            } else {
                Ok(empty_response(200))
            }
        });
        let client = client(transport);
        let storage = Arc::new(MemoryQueueStorage::with(vec![
            QueuedRequest::new(HttpMethod::Delete, "/api/v1/goals/gone", None),
            QueuedRequest::new(HttpMethod::Post, "/api/v1/goals", Some(json!({"n": 1}))),
        ]));
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        let report = queue.replay(&client).await.unwrap();
        assert_eq!(
            report,
            ReplayReport {
                replayed: 1,
                dropped: 1,
                remaining: 0
            }
        );
        assert!(storage.persisted().await.is_empty());
    }

    #[tokio::test]
    async fn test_replay_stops_when_session_is_gone() {
        // Every call 401s and there is no refresh token: the session is
        // over, so queued work must survive for after the next login.
        let transport = MockTransport::new(|_| Ok(empty_response(401)));
        let client = ApiClient::new(
            ClientConfig::new("https://api.test").unwrap(),
            transport,
            Arc::new(MemoryStore::empty()),
        );
        let storage = Arc::new(MemoryQueueStorage::with(vec![QueuedRequest::new(
            HttpMethod::Post,
            "/api/v1/goals",
            None,
        )]));
        let queue = OfflineQueue::open(Arc::clone(&storage)).await.unwrap();

        let report = queue.replay(&client).await.unwrap();
        assert_eq!(
            report,
            ReplayReport {
                replayed: 0,
                dropped: 0,
                remaining: 1
            }
        );
        assert_eq!(storage.persisted().await.len(), 1);
    }
}
