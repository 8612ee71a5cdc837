//! Key-value storage backends for the session store.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{SessionError, SessionResult};

/// String key-value storage with the semantics of browser `localStorage`:
/// synchronous, unencrypted, no expiry.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;
    fn remove_item(&self, key: &str) -> SessionResult<()>;
}

/// Storage persisted as a flat JSON object in a single file.
///
/// Every call reads the file from disk; nothing is cached in memory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An unparseable file reads as empty so the next write replaces it.
    fn read_map(&self) -> SessionResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(error) => {
                tracing::warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.path.display(),
                    error
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Writes to a sibling temp file, then renames it over the session file.
    fn write_map(&self, map: &BTreeMap<String, String>) -> SessionResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;
        let serialized = serde_json::to_vec_pretty(map).map_err(|error| {
            SessionError::Storage(format!("Failed to serialize session file: {error}"))
        })?;
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(&serialized)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|error| SessionError::Io(error.error))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        if map.is_empty() {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(error) => Err(error.into()),
            }
        } else {
            self.write_map(&map)
        }
    }
}

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let guard = self
            .items
            .lock()
            .map_err(|error| SessionError::Storage(error.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut guard = self
            .items
            .lock()
            .map_err(|error| SessionError::Storage(error.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut guard = self
            .items
            .lock()
            .map_err(|error| SessionError::Storage(error.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path).set_item("auth_token", "abc").unwrap();
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("auth_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn file_storage_removes_file_when_last_key_goes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.remove_item("a").unwrap();
        assert!(storage.path().exists());
        storage.remove_item("b").unwrap();
        assert!(!storage.path().exists());
        storage.remove_item("b").unwrap();
    }

    #[test]
    fn file_storage_recovers_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{truncated").unwrap();
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get_item("user").unwrap(), None);
        storage.remove_item("auth_token").unwrap();
        storage.set_item("auth_token", "fresh").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap().as_deref(), Some("fresh"));

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[test]
    fn file_storage_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn memory_storage_basic_operations() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
