//! InMemorySettingsStore - HashMap-backed settings store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{SettingsStore, StoreError};

/// In-memory settings store backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same settings.
#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySettingsStore {
    /// Create a new empty settings store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let settings = self
            .settings
            .read()
            .map_err(|_| StoreError::LockPoisoned("get_setting"))?;
        Ok(settings.get(key).cloned())
    }

    fn set_setting(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut settings = self
            .settings
            .write()
            .map_err(|_| StoreError::LockPoisoned("set_setting"))?;
        settings.insert(key.to_string(), value);
        Ok(())
    }
}
