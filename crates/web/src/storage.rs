//! Browser `localStorage` as a key-value store.

use accesspanel_core::{KeyValueStore, StoreError};

/// Handle to the window's `localStorage`.
///
/// Holds nothing itself: the storage object is looked up on every call, so
/// the handle stays `Send + Sync` and cheap to copy into closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("localStorage access denied: {e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("getItem('{key}') failed: {e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("setItem('{key}') failed: {e:?}")))
    }
}
