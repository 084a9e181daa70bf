//! Ascend Domain - Core business types
//!
//! This crate defines the domain model for the Ascend platform API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod id;
pub mod queue;
pub mod request;

pub use auth::{
    AuthError, AuthSession, CredentialPair, LoginRequest, RefreshRequest, RefreshResponse,
    UserProfile,
};
pub use id::generate_request_id;
pub use queue::QueuedRequest;
pub use request::HttpMethod;
