use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{PersistError, Result};
use crate::kv::{KeyValueStore, CHATS_KEY};

/// In-memory key-value store
///
/// Keeps the serialized strings exactly as written, so tests can compare
/// persisted bytes. Writes can be made to fail to exercise error paths.
#[derive(Default)]
pub struct InMemoryStorage {
    values: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
    writes: Mutex<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the chat key with a raw (possibly corrupt) value
    pub fn with_raw_chats(raw: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.insert(CHATS_KEY, raw);
        storage
    }

    pub fn insert(&self, key: &str, raw: impl Into<String>) {
        self.lock_values().insert(key.to_string(), raw.into());
    }

    /// Raw value currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock_values().get(key).cloned()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    fn count_write(&self) {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.insert(key, value);
        self.count_write();
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.lock_values().remove(key);
        self.count_write();
        Ok(())
    }
}
