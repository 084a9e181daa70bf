//! Authentication coordination for the Ascend client.
//!
//! The token refresh routine itself lives on the client; this module
//! provides the single-flight gate that guarantees at most one refresh
//! call is in flight at any time.

mod refresh_gate;

pub use refresh_gate::RefreshGate;
