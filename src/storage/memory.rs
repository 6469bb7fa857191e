use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::AppResult;
use crate::storage::KeyValueStorage;

/// In-memory key-value storage. Used as the test fake and as the
/// fallback when no durable state directory is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }
}
