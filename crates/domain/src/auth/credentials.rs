//! Credential pair issued by the backend.

use serde::{Deserialize, Serialize};

/// The access/refresh token pair owned by the client process.
///
/// Created from a login or registration response, replaced wholesale on
/// every refresh, and deleted on logout or when a refresh is rejected by
/// the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived bearer token attached to every authenticated request.
    pub access_token: String,
    /// Long-lived token exchanged for a new access token on expiry.
    pub refresh_token: String,
}

impl CredentialPair {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Replaces the access token, rotating the refresh token only when the
    /// backend issued a new one.
    #[must_use]
    pub fn rotated(self, access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token: refresh_token.unwrap_or(self.refresh_token),
        }
    }
}
