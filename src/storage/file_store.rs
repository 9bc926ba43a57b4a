// File-backed key-value store: one file per key inside a data directory

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.tmp", key));
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        // Write the whole value to a sibling file, then rename over the target
        // so readers never observe a half-written value.
        let mut file = fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::debug!(key, bytes = value.len(), "Persisted value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in_tempdir() -> (FileStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_open_creates_directory() {
        let (store, _dir) = store_in_tempdir();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_missing_key_is_none() {
        let (store, _dir) = store_in_tempdir();
        assert!(store.get("edulog_records").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let (store, _dir) = store_in_tempdir();
        store.set("edulog_sheet_url", "https://example.com/exec").unwrap();
        assert_eq!(
            store.get("edulog_sheet_url").unwrap().as_deref(),
            Some("https://example.com/exec")
        );
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let (store, _dir) = store_in_tempdir();
        store.set("k", "a much longer first value").unwrap();
        store.set("k", "short").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, _dir) = store_in_tempdir();
        store.set("k", "v").unwrap();
        let names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k".to_string()]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _dir) = store_in_tempdir();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        assert!(matches!(
            store.get(""),
            Err(StorageError::InvalidKey { .. })
        ));
        assert!(matches!(
            store.get(".hidden"),
            Err(StorageError::InvalidKey { .. })
        ));
    }
}
