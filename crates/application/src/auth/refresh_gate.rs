//! Single-flight gate for token refresh.
//!
//! When an access token expires while several requests are in flight,
//! every one of them observes a 401 at roughly the same time. The gate
//! makes sure they share exactly one refresh round-trip: the first
//! caller installs a shared future, later callers clone and await it,
//! and the marker is cleared once the refresh settles so a future
//! expiry starts fresh instead of reusing a stale outcome.

use std::sync::Arc;

use ascend_domain::AuthError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

type SharedRefresh = Shared<BoxFuture<'static, Result<String, AuthError>>>;

/// The process-wide "a refresh is currently underway" marker.
///
/// Cloning the gate shares the marker, so every clone of a client
/// coordinates on the same in-flight refresh.
#[derive(Clone, Default)]
pub struct RefreshGate {
    pending: Arc<Mutex<Option<SharedRefresh>>>,
}

impl RefreshGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `refresh` unless one is already in flight, in which case the
    /// supplied future is dropped and the caller awaits the pending one.
    ///
    /// The marker is installed before any await point, so two callers
    /// entering on the same tick still coalesce. The in-flight future
    /// clears the marker itself as its final step, success or failure.
    ///
    /// # Errors
    ///
    /// Propagates the (shared) outcome of the refresh routine.
    pub async fn run<F>(&self, refresh: F) -> Result<String, AuthError>
    where
        F: Future<Output = Result<String, AuthError>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock().await;
            if let Some(inflight) = pending.as_ref() {
                inflight.clone()
            } else {
                let slot = Arc::clone(&self.pending);
                let fut = async move {
                    let outcome = refresh.await;
                    slot.lock().await.take();
                    outcome
                }
                .boxed()
                .shared();
                *pending = Some(fut.clone());
                fut
            }
        };

        shared.await
    }
}

impl std::fmt::Debug for RefreshGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshGate").finish_non_exhaustive()
    }
}
