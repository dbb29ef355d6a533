pub mod json_backend;
pub mod memory;
pub mod record_store;

use crate::core::errors::WorklogError;

pub type Result<T> = std::result::Result<T, WorklogError>;

/// Named string slots: the substrate the record store persists into.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

pub use json_backend::{BackupInfo, FileStore};
pub use memory::MemoryStore;
pub use record_store::{RecordStore, DEFAULT_STORAGE_KEY};
