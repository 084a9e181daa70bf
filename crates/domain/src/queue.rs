//! Offline request queue entries.
//!
//! When a mutating call is attempted without connectivity, the client
//! records it as a [`QueuedRequest`] and replays it later. Entries are
//! FIFO by append; there is no deduplication and no per-entry retry
//! bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::generate_request_id;
use crate::request::HttpMethod;

/// A mutating request captured while offline, pending replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedRequest {
    /// Unique entry identifier.
    pub id: String,
    /// HTTP method of the original request.
    pub method: HttpMethod,
    /// Backend path the request targets (e.g. `/api/v1/goals`).
    pub path: String,
    /// JSON body of the original request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// When the entry was appended to the queue.
    pub queued_at: DateTime<Utc>,
}

impl QueuedRequest {
    /// Creates a new entry stamped with a fresh ID and the current time.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            id: generate_request_id(),
            method,
            path: path.into(),
            body,
            queued_at: Utc::now(),
        }
    }
}
