use std::collections::HashMap;
#[cfg(test)]
use std::io;

use parking_lot::RwLock;

use crate::storage::{KeyValueStore, StoreError};

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose reads and/or writes always fail, for exercising error outcomes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingStore {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub backing: MemoryStore,
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read disabled").into());
        }
        self.backing.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "quota exceeded").into());
        }
        self.backing.set(key, value)
    }
}
