//! RecordStore - reads and writes the whole chatbot collection under one key.

use tracing::warn;

use super::SettingsStore;
use crate::record::Collection;

/// Settings key the collection lives under unless configured otherwise.
pub const DEFAULT_COLLECTION_KEY: &str = "mwai_chatbots";

/// Accessor for the record collection.
///
/// Never caches: every call goes to the settings store.
#[derive(Clone)]
pub struct RecordStore<S> {
    settings: S,
    key: String,
}

impl<S: SettingsStore> RecordStore<S> {
    /// Create an accessor for the collection stored under `key`.
    pub fn new(settings: S, key: impl Into<String>) -> Self {
        Self {
            settings,
            key: key.into(),
        }
    }

    /// Get a reference to the underlying settings store.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Read the whole collection.
    ///
    /// An absent key, a failed read, or an unparseable value all come back as
    /// an empty collection; callers report "no records" in every case.
    pub fn fetch_collection(&self) -> Collection {
        let raw = match self.settings.get_setting(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read record collection");
                return Collection::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored record collection is malformed");
                Collection::new()
            }
        }
    }

    /// Replace the whole collection. Returns true iff the store accepted it.
    pub fn persist_collection(&self, collection: &Collection) -> bool {
        let raw = match serde_json::to_string(collection) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to serialize record collection");
                return false;
            }
        };

        match self.settings.set_setting(&self.key, raw) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to write record collection");
                false
            }
        }
    }
}
