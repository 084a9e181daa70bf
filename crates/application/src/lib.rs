//! Ascend Application - API client core
//!
//! This crate holds the storage- and transport-agnostic heart of the
//! Ascend client: request augmentation, the 401 refresh-and-retry
//! protocol with single-flight coordination, and the offline request
//! queue. Concrete HTTP and persistence adapters live in the
//! infrastructure crate and plug in through the ports defined here.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod offline;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use offline::{Dispatch, OfflineQueue, OfflineQueueError, ReplayReport};
