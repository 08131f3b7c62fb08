//! In-memory storage backend.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps values in a map, for tests and hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Backend("memory store poisoned by a panicked writer".to_string())
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<String>>> {
        let key = key.to_string();
        Box::pin(async move {
            let values = self.values.read().map_err(poisoned)?;
            Ok(values.get(&key).cloned())
        })
    }

    fn write(&self, key: &str, value: String) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.values.write().map_err(poisoned)?.insert(key, value);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_read_unwritten_key() {
        let storage = MemoryStorage::new();
        assert_eq!(block_on(storage.read("pages")).unwrap(), None);
    }

    #[test]
    fn test_write_replaces_value() {
        let storage = MemoryStorage::new();
        block_on(storage.write("pages", "[]".to_string())).unwrap();
        block_on(storage.write("pages", "[{}]".to_string())).unwrap();
        assert_eq!(block_on(storage.read("pages")).unwrap().as_deref(), Some("[{}]"));
    }
}
