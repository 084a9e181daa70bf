//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest
//! library. It handles all HTTP communication for the client.

use std::future::Future;
use std::pin::Pin;

use ascend_application::ports::{
    HttpTransport, TransportError, TransportRequest, TransportResponse,
};
use ascend_domain::HttpMethod;
use reqwest::{Client, Method};
use tracing::debug;

/// HTTP transport backed by `reqwest::Client`.
///
/// Connection pooling and TLS live in the wrapped client; the
/// per-request deadline comes in with each [`TransportRequest`].
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport announcing the given user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return TransportError::Connection(error.to_string());
        }

        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), request.url.clone())
                .timeout(request.timeout);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
                .to_vec();

            debug!(status, url = %request.url, "response received");
            Ok(TransportResponse { status, body })
        })
    }
}
