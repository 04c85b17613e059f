//! Key/Value Storage
//!
//! The shape of browser `localStorage`: string keys, string values,
//! shared and mutated through `&self`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Persistent string storage
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S> KeyValueStorage for Arc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Storage held in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token"), None);

        storage.set("token", "abc");
        assert_eq!(storage.get("token").as_deref(), Some("abc"));

        storage.set("token", "def");
        assert_eq!(storage.get("token").as_deref(), Some("def"));
        assert_eq!(storage.len(), 1);

        storage.remove("token");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_shared_through_arc() {
        let storage = Arc::new(MemoryStorage::new());
        let other = Arc::clone(&storage);

        other.set("user", "{}");
        assert_eq!(storage.get("user").as_deref(), Some("{}"));
    }
}
