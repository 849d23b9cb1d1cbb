//! Durable storage adapters.

mod file_storage;
mod memory_storage;

pub use file_storage::{FileKeyValueStorage, default_storage_path};
pub use memory_storage::MemoryStorage;
