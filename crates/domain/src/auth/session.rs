//! Wire types for the authentication endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Successful login response: both tokens plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Freshly issued access token.
    pub access_token: String,
    /// Freshly issued refresh token.
    pub refresh_token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// The user record returned alongside a login.
///
/// The client treats everything beyond identity as optional; dashboards
/// and admin views read richer payloads through the opaque resource
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier for the user.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Display name, if the account has one.
    #[serde(default)]
    pub name: Option<String>,
    /// Platform role (e.g. mentor, mentee, admin).
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `POST /api/v1/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token being exchanged.
    pub refresh_token: String,
}

/// Response of `POST /api/v1/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// The new access token.
    pub access_token: String,
    /// A rotated refresh token, when the backend issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}
