//! Filesystem locations for persisted client state.

use std::path::PathBuf;

/// Returns the default directory for Ascend client state
/// (credentials, offline queue).
///
/// Resolves to the platform config directory, falling back to the
/// system temp directory when none is available.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ascend")
}
