//! Persistent client key-value storage.
//!
//! The browser backs this with `localStorage`; tests and the CLI use
//! [`MemoryStore`]. Writes are last-write-wins with no cross-tab coordination.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the in-progress grading draft for one entity.
pub fn grading_draft_key(entity_id: &str) -> String {
    format!("grading_state_{entity_id}")
}

/// String key-value storage. Failures are swallowed; storage is best effort.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Decode a JSON value stored under `key`. Corrupt entries read as absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%key, %error, "ignoring corrupt stored value");
            None
        }
    }
}

/// Encode `value` as JSON under `key`.
pub fn save_json<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    store.set(key, &raw);
}

/// Bearer token stored under `key`, if present and non-empty.
pub fn bearer_token<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store.get(key).filter(|token| !token.trim().is_empty())
}
