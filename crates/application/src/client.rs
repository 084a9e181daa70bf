//! The authenticated API client.
//!
//! Wraps every outbound call with bearer-token injection and recovers
//! transparently from access-token expiry: the first 401 a request sees
//! triggers the shared refresh routine, after which the request is
//! re-issued exactly once with the new token. All other failures
//! propagate to the caller unmodified.

use std::sync::Arc;

use ascend_domain::{
    AuthError, AuthSession, CredentialPair, HttpMethod, LoginRequest, RefreshRequest,
    RefreshResponse, generate_request_id,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::RefreshGate;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::ports::{HttpTransport, TokenStorage, TransportRequest, TransportResponse};

const LOGIN_PATH: &str = "/api/v1/auth/login";
const REFRESH_PATH: &str = "/api/v1/auth/refresh";
const LOGOUT_PATH: &str = "/api/v1/auth/logout";

/// Authenticated client for the Ascend backend.
///
/// Holds the base configuration, a transport, a credential store and the
/// in-flight refresh marker behind one `Arc`, so clones are cheap and
/// all of them coordinate on the same single-flight refresh.
pub struct ApiClient<T, S> {
    inner: Arc<ClientInner<T, S>>,
}

struct ClientInner<T, S> {
    config: ClientConfig,
    transport: T,
    storage: S,
    refresh_gate: RefreshGate,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport + 'static,
    S: TokenStorage + 'static,
{
    /// Creates a client over the given transport and credential store.
    pub fn new(config: ClientConfig, transport: T, storage: S) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                storage,
                refresh_gate: RefreshGate::new(),
            }),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Performs a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send_with_retry(HttpMethod::Get, path, None).await?;
        Self::decode(&Self::check_status(response)?)
    }

    /// Performs a POST request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn post<R, B>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Self::encode(body)?;
        let response = self
            .send_with_retry(HttpMethod::Post, path, Some(&body))
            .await?;
        Self::decode(&Self::check_status(response)?)
    }

    /// Performs a PUT request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn put<R, B>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Self::encode(body)?;
        let response = self
            .send_with_retry(HttpMethod::Put, path, Some(&body))
            .await?;
        Self::decode(&Self::check_status(response)?)
    }

    /// Performs a DELETE request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send_with_retry(HttpMethod::Delete, path, None).await?;
        Self::decode(&Self::check_status(response)?)
    }

    /// Untyped pass-through request for callers that treat endpoint
    /// payloads as opaque JSON (dashboards, admin views, queue replay).
    ///
    /// Empty response bodies decode as JSON `null`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let response = self.send_with_retry(method, path, body.as_ref()).await?;
        Self::decode(&Self::check_status(response)?)
    }

    /// Authenticates against the backend and persists both tokens before
    /// resolving with the new session.
    ///
    /// The 401-recovery protocol is not applied here: a 401 from the
    /// login endpoint is a credential failure and surfaces as
    /// [`ApiError::Http`].
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthSession, ApiError> {
        let body = Self::encode(credentials)?;
        let token = self.access_token().await?;
        let response = self
            .dispatch(HttpMethod::Post, LOGIN_PATH, Some(&body), token.as_deref())
            .await?;
        let session: AuthSession = Self::decode(&Self::check_status(response)?)?;

        self.inner
            .storage
            .store(&CredentialPair::new(
                session.access_token.clone(),
                session.refresh_token.clone(),
            ))
            .await?;

        info!(user_id = %session.user.id, "login succeeded");
        Ok(session)
    }

    /// Notifies the backend (best effort) and unconditionally clears the
    /// local credentials.
    ///
    /// # Errors
    ///
    /// Returns an error only when the credential store cannot be cleared;
    /// a failed or rejected logout call is logged and swallowed.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let token = match self.inner.storage.load().await {
            Ok(credentials) => credentials.map(|c| c.access_token),
            Err(err) => {
                warn!(error = %err, "could not read credentials for logout notification");
                None
            }
        };

        match self
            .dispatch(HttpMethod::Post, LOGOUT_PATH, None, token.as_deref())
            .await
        {
            Ok(response) if response.is_success() => {}
            Ok(response) => warn!(status = response.status, "logout notification rejected"),
            Err(err) => warn!(error = %err, "logout notification failed"),
        }

        self.inner.storage.clear().await?;
        info!("signed out, local credentials cleared");
        Ok(())
    }

    /// Sends a request with the stored access token and handles the one
    /// allowed refresh-and-retry cycle on a 401.
    pub(crate) async fn send_with_retry(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, ApiError> {
        let token = self.access_token().await?;
        let response = self.dispatch(method, path, body, token.as_deref()).await?;
        if response.status != 401 {
            return Ok(response);
        }

        debug!(path, "received 401, running token refresh");
        let refreshed = match self.refresh_access_token().await {
            Ok(token) => token,
            Err(AuthError::RefreshTokenAbsent) => return Err(ApiError::RefreshTokenAbsent),
            Err(AuthError::Network { message }) => return Err(ApiError::Network { message }),
            Err(AuthError::Storage { message }) => return Err(ApiError::Storage { message }),
            Err(err @ AuthError::RefreshFailed { .. }) => {
                return Err(ApiError::AuthExpired {
                    message: err.to_string(),
                });
            }
        };

        // One retry only; a second 401 means the fresh token is not
        // accepted either and looping would never terminate.
        let retry = self.dispatch(method, path, body, Some(&refreshed)).await?;
        if retry.status == 401 {
            warn!(path, "request rejected again after token refresh");
            return Err(ApiError::AuthExpired {
                message: "request was rejected again after a token refresh".to_string(),
            });
        }
        Ok(retry)
    }

    /// Resolves the current access token through the single-flight gate.
    async fn refresh_access_token(&self) -> Result<String, AuthError> {
        let client = self.clone();
        self.inner
            .refresh_gate
            .run(async move { client.perform_refresh().await })
            .await
    }

    /// The actual refresh routine. Runs at most once per expiry, shared
    /// by every waiter through the gate.
    async fn perform_refresh(&self) -> Result<String, AuthError> {
        let stored = self
            .inner
            .storage
            .load()
            .await
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?;
        let Some(credentials) = stored else {
            return Err(AuthError::RefreshTokenAbsent);
        };

        debug!("exchanging refresh token");
        let body = Self::encode(&RefreshRequest {
            refresh_token: credentials.refresh_token.clone(),
        })
        .map_err(|e| AuthError::RefreshFailed {
            message: e.to_string(),
        })?;

        // The expired access token is deliberately not attached here.
        let response = self
            .dispatch(HttpMethod::Post, REFRESH_PATH, Some(&body), None)
            .await
            .map_err(|e| match e {
                ApiError::Network { message } => AuthError::Network { message },
                other => AuthError::RefreshFailed {
                    message: other.to_string(),
                },
            })?;

        if !response.is_success() {
            warn!(
                status = response.status,
                "refresh token rejected, clearing credentials"
            );
            if let Err(err) = self.inner.storage.clear().await {
                warn!(error = %err, "failed to clear credentials after rejected refresh");
            }
            return Err(AuthError::RefreshFailed {
                message: format!("refresh endpoint returned status {}", response.status),
            });
        }

        let parsed: RefreshResponse =
            serde_json::from_slice(&response.body).map_err(|e| AuthError::RefreshFailed {
                message: format!("invalid refresh response: {e}"),
            })?;

        let access_token = parsed.access_token.clone();
        let rotated = credentials.rotated(parsed.access_token, parsed.refresh_token);
        self.inner
            .storage
            .store(&rotated)
            .await
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?;

        debug!("access token refreshed");
        Ok(access_token)
    }

    /// Builds the augmented request and hands it to the transport.
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<TransportResponse, ApiError> {
        let url = self.inner.config.endpoint(path)?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Request-ID".to_string(), generate_request_id()),
        ];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        debug!(method = %method, path, "sending request");
        let request = TransportRequest {
            method,
            url,
            headers,
            body: body.cloned(),
            timeout: self.inner.config.timeout(),
        };
        Ok(self.inner.transport.execute(request).await?)
    }

    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.inner.storage.load().await?.map(|c| c.access_token))
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest {
            message: format!("could not encode request body: {e}"),
        })
    }

    fn check_status(response: TransportResponse) -> Result<TransportResponse, ApiError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            })
        }
    }

    fn decode<R: DeserializeOwned>(response: &TransportResponse) -> Result<R, ApiError> {
        if response.body.is_empty() {
            // Empty bodies (204-style) decode from JSON null.
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&response.body)
        }
        .map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}
