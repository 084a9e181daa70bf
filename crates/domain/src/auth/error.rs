//! Authentication errors.

use thiserror::Error;

/// Outcome of the token refresh routine.
///
/// Cloneable so a single refresh result can be fanned out to every
/// request waiting on the same in-flight refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No refresh token is present in storage; the caller must
    /// re-authenticate from scratch. No network call was made.
    #[error("no refresh token available")]
    RefreshTokenAbsent,

    /// The refresh endpoint rejected the exchange.
    #[error("token refresh failed: {message}")]
    RefreshFailed {
        /// Error description.
        message: String,
    },

    /// The refresh call never reached the server.
    #[error("network error during token refresh: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// Reading or writing the credential store failed.
    #[error("token storage error: {message}")]
    Storage {
        /// Error description.
        message: String,
    },
}
