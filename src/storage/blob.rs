//! Key-value blob store abstraction
//!
//! All persistence goes through [`BlobStore`]: an opaque string-keyed store of
//! JSON documents. The production backend keeps one file per key and writes
//! atomically (temp file, fsync, rename) so a crash never leaves a half-written
//! document. Tests use the in-memory backend.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AqshaError, AqshaResult};

/// Opaque string-keyed JSON document store
pub trait BlobStore: Send + Sync {
    /// Read the raw document stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> AqshaResult<Option<String>>;

    /// Store a raw document under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> AqshaResult<()>;

    /// Remove the document under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> AqshaResult<()>;
}

/// Deserialize the value under `key`, or `None` if the key is absent
pub fn read_value<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> AqshaResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).map_err(|e| {
                AqshaError::Storage(format!("Failed to parse value for '{}': {}", key, e))
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
pub fn write_value<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) -> AqshaResult<()> {
    let raw = serde_json::to_string(value)
        .map_err(|e| AqshaError::Storage(format!("Failed to serialize '{}': {}", key, e)))?;
    store.set(key, &raw)
}

/// File-backed blob store: one JSON file per key under a base directory
pub struct FileBlobStore {
    base_dir: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at `base_dir`; the directory is created lazily on
    /// first write
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    /// Write atomically: temp file in the same directory, fsync, then rename
    fn write_atomic(&self, path: &Path, contents: &str) -> AqshaResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AqshaError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = path.with_extension("json.tmp");

        let file = File::create(&temp_path)
            .map_err(|e| AqshaError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| AqshaError::Storage(format!("Failed to write data: {}", e)))?;

        writer
            .flush()
            .map_err(|e| AqshaError::Storage(format!("Failed to flush data: {}", e)))?;

        writer
            .get_ref()
            .sync_all()
            .map_err(|e| AqshaError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AqshaError::Storage(format!("Failed to rename temp file: {}", e))
        })?;

        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> AqshaResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            AqshaError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> AqshaResult<()> {
        self.write_atomic(&self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> AqshaResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AqshaError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// In-memory blob store for tests
#[derive(Default)]
pub struct MemoryBlobStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> AqshaResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AqshaResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AqshaResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.remove(key);
        Ok(())
    }
}
