//! Offline support for mutating requests.

mod queue;

pub use queue::{Dispatch, OfflineQueue, OfflineQueueError, ReplayReport};
