//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_transport;
mod queue_storage;
mod token_storage;

pub use http_transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};
pub use queue_storage::{QueueStorage, QueueStorageError};
pub use token_storage::{TokenStorage, TokenStorageError};
