//! Persistence adapters for credentials and the offline queue.

mod file;
mod memory;
mod queue_file;

pub use file::FileTokenStorage;
pub use memory::MemoryTokenStorage;
pub use queue_file::FileQueueStorage;
