//! Authentication domain types

mod credentials;
mod error;
mod session;

pub use credentials::CredentialPair;
pub use error::AuthError;
pub use session::{AuthSession, LoginRequest, RefreshRequest, RefreshResponse, UserProfile};
