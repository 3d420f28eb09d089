use std::collections::HashMap;

use crate::error::CoreError;

/// Persistence platform trait: key-value string storage.
///
/// The platform stores raw strings. Encoding the cart is the storage
/// adapter's job (see [`crate::storage`]), not the platform's.
///
/// Implementations: in-memory map, browser localStorage, a JSON file, etc.
pub trait Persistence {
    /// Write a string value under key, replacing any previous value.
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError>;

    /// Read a string value by key. Returns `None` if not found.
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Remove a key from storage. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Volatile store backed by a `HashMap`. Used by tests and by hosts that do
/// not need the cart to outlive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    entries: HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing the `Result` of [`Persistence::load`].
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Persistence for MemoryPersistence {
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_overwrites_previous_value() {
        let mut store = MemoryPersistence::new();
        store.save("cart", "[]").unwrap();
        store.save("cart", "[1]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn missing_key_loads_none() {
        let store = MemoryPersistence::new();
        assert_eq!(store.load("cart").unwrap(), None);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut store = MemoryPersistence::new();
        store.remove("cart").unwrap();
        store.save("cart", "x").unwrap();
        store.remove("cart").unwrap();
        assert!(store.raw("cart").is_none());
    }
}
