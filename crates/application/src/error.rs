//! Caller-facing error taxonomy.

use thiserror::Error;

use crate::ports::{TokenStorageError, TransportError};

/// Errors surfaced by [`crate::ApiClient`] operations.
///
/// Transport and server failures propagate unmodified; the one exception
/// is a 401, which the client intercepts once per originating request
/// for a transparent refresh-and-retry before giving up.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connectivity loss or timeout).
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// The server answered with a non-2xx status other than a recovered 401.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, lossily decoded for diagnostics.
        body: String,
    },

    /// A 401 persisted after the one allowed refresh-and-retry cycle, or
    /// the refresh itself was rejected. Local credentials have been
    /// cleared; the caller is expected to start a re-authentication flow.
    #[error("authentication expired: {message}")]
    AuthExpired {
        /// Error description.
        message: String,
    },

    /// No refresh token was available, so no refresh was attempted.
    ///
    /// A specialization of the auth-expired case: the caller must
    /// re-authenticate from scratch.
    #[error("no refresh token available")]
    RefreshTokenAbsent,

    /// The credential store could not be read or written.
    #[error("token storage error: {message}")]
    Storage {
        /// Error description.
        message: String,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Error description.
        message: String,
    },

    /// The request could not be constructed (bad path or body).
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Error description.
        message: String,
    },
}

impl ApiError {
    /// Returns true if the failure means the session is gone and the
    /// caller must re-authenticate.
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. } | Self::RefreshTokenAbsent)
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}

impl From<TokenStorageError> for ApiError {
    fn from(error: TokenStorageError) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_expired_classification() {
        assert!(ApiError::RefreshTokenAbsent.is_auth_expired());
        assert!(
            ApiError::AuthExpired {
                message: "rejected".to_string()
            }
            .is_auth_expired()
        );
        assert!(
            !ApiError::Http {
                status: 500,
                body: String::new()
            }
            .is_auth_expired()
        );
    }

    #[test]
    fn test_transport_errors_map_to_network() {
        let err: ApiError = TransportError::Timeout { timeout_ms: 30_000 }.into();
        assert!(matches!(err, ApiError::Network { .. }));
    }
}
