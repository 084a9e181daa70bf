//! HTTP transport port
//!
//! The client core never touches an HTTP library directly; it hands a
//! fully prepared request to this port and gets back a status plus raw
//! body bytes. The reqwest adapter in the infrastructure crate is the
//! production implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use ascend_domain::HttpMethod;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// A prepared outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: Url,
    /// Header name/value pairs, already augmented by the client.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Deadline after which the call fails as a transport error.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Returns the value of a header, if present (case-insensitive name).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response received from the backend.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failures that prevented a response from being received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured deadline elapsed.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established or was lost mid-flight.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Port for executing HTTP requests.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and resolves with the response, or a
    /// [`TransportError`] when no response was received.
    fn execute(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + '_>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn execute(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + '_>> {
        (**self).execute(request)
    }
}
