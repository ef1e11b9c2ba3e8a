//! `localStorage` backing for the workflow key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Grading drafts and the bearer token live here. Reads and writes are best
//! effort: a missing or blocked storage behaves like an empty one.

use workflow::store::KeyValueStore;

/// Zero-sized handle over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
