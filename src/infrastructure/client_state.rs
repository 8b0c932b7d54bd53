use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::repositories::client_store::KeyValueStore;

/// In-memory counter store. Backs tests and embeddings without persistent
/// client storage; contents do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }
}
