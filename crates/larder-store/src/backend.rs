//! Storage backends.
//!
//! A backend is a string-keyed document store: the persistence medium the
//! inventory sits on. The file backend is the durable one; the memory
//! backend gives each instance its own isolated state, which keeps test
//! sessions from interfering with one another.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::fs;

use crate::error::{Error, Result};

/// String-keyed get/set/remove surface the store persists through.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the document stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the document stored under `key`. Missing keys are fine.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key backend rooted at a data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Unavailable(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            Error::Unavailable(format!(
                "Failed to create data directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        // Atomic write: write to temp file then rename.
        let path = self.key_path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).await.map_err(|e| {
            Error::Unavailable(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        fs::rename(&temp_path, &path).await.map_err(|e| {
            Error::Unavailable(format!("Failed to rename to {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Unavailable(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-process backend holding documents in a map.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Unavailable("Backend lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Unavailable("Backend lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Unavailable("Backend lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
