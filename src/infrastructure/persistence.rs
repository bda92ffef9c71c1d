//! Key-value persistence for the client-local stores.
//!
//! Each store persists under a well-known key. The on-disk backend maps a
//! key to a pretty-printed JSON file inside the data directory; the
//! in-memory backend keeps the same contract for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key for the product catalog.
pub const PRODUCTS_KEY: &str = "kk_products";
/// Storage key for the farmer directory.
pub const FARMERS_KEY: &str = "kk_farmers";
/// Storage key for the logged-in farmer session.
pub const SESSION_KEY: &str = "kk_session";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read {key}: {source}")]
    Read {
        key: String,
        source: io::Error,
    },
    #[error("could not write {key}: {source}")]
    Write {
        key: String,
        source: io::Error,
    },
    #[error("stored data under {key} is malformed: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// A string-valued key-value store. `read` returns `None` for keys that
/// were never written.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the value under `key`, or `None` if the key is absent.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn StorageBackend,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.read(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Encodes `value` and stores it under `key`.
pub fn write_json<T: Serialize>(
    storage: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.write(key, &raw)
}

/// Stores each key as `<key>.json` inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens file storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.key_path(key), value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// Keeps values in a map. Used by tests and anywhere a throwaway store
/// is convenient.
#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        write_json(&storage, "kk_test", &vec![1u64, 2, 3]).unwrap();
        let loaded: Option<Vec<u64>> = read_json(&storage, "kk_test").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        let loaded: Option<Vec<u64>> = read_json(&storage, "kk_absent").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_file_storage_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("data");
        let storage = FileStorage::open(&nested).unwrap();

        storage.write("kk_test", "{}").unwrap();
        assert!(nested.join("kk_test.json").exists());
    }

    #[test]
    fn test_malformed_payload_is_reported_with_key() {
        let storage = MemoryStorage::new();
        storage.write("kk_products", "not json at all").unwrap();

        let result: Result<Option<Vec<u64>>, StorageError> = read_json(&storage, "kk_products");
        match result {
            Err(StorageError::Malformed { key, .. }) => assert_eq!(key, "kk_products"),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        write_json(&storage, "kk_session", &Some("f1".to_string())).unwrap();
        let loaded: Option<Option<String>> = read_json(&storage, "kk_session").unwrap();
        assert_eq!(loaded, Some(Some("f1".to_string())));
    }
}
