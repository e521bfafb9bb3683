//! Store - the shared key-value settings store and the record accessor on top.
//!
//! The settings store is an external collaborator; this crate only needs
//! "get a string by key" and "replace a string by key". `RecordStore` layers
//! the chatbot collection on top: it reads the whole collection from one key
//! and writes the whole collection back, never a single field.
//!
//! ## Example
//!
//! ```ignore
//! use chatbot_instructions::store::{InMemorySettingsStore, RecordStore};
//!
//! let records = RecordStore::new(InMemorySettingsStore::new(), "mwai_chatbots");
//! let mut collection = records.fetch_collection();
//! collection[0].body = Some("Be brief.".into());
//! assert!(records.persist_collection(&collection));
//! ```

mod file;
mod in_memory;
mod records;

use std::fmt;

pub use file::JsonFileSettingsStore;
pub use in_memory::InMemorySettingsStore;
pub use records::{RecordStore, DEFAULT_COLLECTION_KEY};

/// Abstract string settings storage.
pub trait SettingsStore: Send + Sync {
    /// Get the value stored under `key`. Returns None if absent.
    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set_setting(&self, key: &str, value: String) -> Result<(), StoreError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<T> {
    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_setting(key)
    }

    fn set_setting(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set_setting(key, value)
    }
}

/// Error type for settings store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An internal lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// Filesystem-level failure.
    Io(String),
    /// The stored value could not be (de)serialized.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "settings lock poisoned during {}", operation)
            }
            StoreError::Io(msg) => write!(f, "settings io error: {}", msg),
            StoreError::Serde(msg) => write!(f, "settings serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
