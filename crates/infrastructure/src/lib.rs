//! Ascend Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest-backed HTTP
//! transport and the credential/queue persistence adapters.

pub mod paths;
pub mod serialization;
pub mod storage;
pub mod transport;

pub use paths::default_data_dir;
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
pub use storage::{FileQueueStorage, FileTokenStorage, MemoryTokenStorage};
pub use transport::ReqwestTransport;
