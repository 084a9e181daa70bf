//! Deterministic JSON serialization for Ascend state files.
//!
//! Ensures stable on-disk output by:
//! - Using 2-space indentation
//! - Adding trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
