//! File-backed key-value store: one file per key under a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::store::{KeyValueStore, StoreError};

/// Native stand-in for browser local storage.
///
/// Each key maps to `{dir}/{key}.json`, with every byte outside
/// `[A-Za-z0-9-]` written as `_XX` (hex), so distinct keys never share a
/// file. Writes go to a temporary sibling first and are renamed into place,
/// so a reader never sees a torn blob.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: RwLock::new(()),
        }
    }

    /// Store rooted at `{app_data_dir}/accesspanel`.
    pub fn in_default_location() -> Option<Self> {
        default_data_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut file = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file.push(char::from(byte));
            } else {
                file.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)?;

        tracing::debug!(key, path = %path.display(), "blob written");
        Ok(())
    }
}

/// Resolve `{app_data_dir}/accesspanel`, falling back to `~/.local/share`.
pub fn default_data_dir() -> Option<PathBuf> {
    let mut base = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    })?;
    base.push("accesspanel");
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileKeyValueStore {
        let dir = std::env::temp_dir().join(format!("accesspanel-test-{}", uuid::Uuid::now_v7()));
        FileKeyValueStore::new(dir)
    }

    #[test]
    fn missing_file_reads_as_none() {
        let store = temp_store();
        assert_eq!(store.get("roles").unwrap(), None);
    }

    #[test]
    fn set_then_get_returns_latest_blob() {
        let store = temp_store();
        store.set("roles", "[]").unwrap();
        store.set("roles", r#"[{"id":1,"name":"user"}]"#).unwrap();

        assert_eq!(
            store.get("roles").unwrap().as_deref(),
            Some(r#"[{"id":1,"name":"user"}]"#)
        );
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn keys_are_escaped_into_file_names() {
        let store = temp_store();
        assert_eq!(store.path_for("roles"), store.dir().join("roles.json"));
        assert_eq!(store.path_for("../roles"), store.dir().join("_2E_2E_2Froles.json"));
    }

    #[test]
    fn similar_keys_do_not_share_a_file() {
        let store = temp_store();
        assert_ne!(store.path_for("a.b"), store.path_for("a_b"));

        store.set("a.b", "dot").unwrap();
        store.set("a_b", "underscore").unwrap();
        assert_eq!(store.get("a.b").unwrap().as_deref(), Some("dot"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("underscore"));
        let _ = std::fs::remove_dir_all(store.dir());
    }
}
