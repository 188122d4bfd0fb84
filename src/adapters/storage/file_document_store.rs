//! File-based Document Store Adapter
//!
//! Stores each document as one file:
//! `<cached_path>/cached/<namespace>/<file>` or
//! `<persistent_path>/persistent/<namespace>/<file>`.
//! Filenames are reduced to their last path component before use.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{DocumentKey, DocumentStore, DocumentStoreError, Tier};

/// File-backed document store with a cached and a persistent tier
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    cached_root: PathBuf,
    persistent_root: PathBuf,
}

impl FileDocumentStore {
    /// Create a store rooted at the two configured directories
    ///
    /// # Example
    /// ```ignore
    /// let store = FileDocumentStore::new("./data", "./data");
    /// ```
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(cached_path: P, persistent_path: Q) -> Self {
        Self {
            cached_root: cached_path.as_ref().join("cached"),
            persistent_root: persistent_path.as_ref().join("persistent"),
        }
    }

    fn root(&self, tier: Tier) -> &Path {
        match tier {
            Tier::Cached => &self.cached_root,
            Tier::Persistent => &self.persistent_root,
        }
    }

    /// Resolve a key to its file path, rejecting names that escape the root
    fn file_path(&self, key: &DocumentKey) -> Result<PathBuf, DocumentStoreError> {
        let namespace = base_name(&key.namespace)?;
        let filename = base_name(&key.filename)?;
        Ok(self.root(key.tier).join(namespace).join(filename))
    }

    /// Remove the whole cached tier
    pub async fn clear_cache(&self) -> Result<(), DocumentStoreError> {
        match fs::remove_dir_all(&self.cached_root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DocumentStoreError::IoError(e.to_string())),
        }
    }
}

fn base_name(name: &str) -> Result<&str, DocumentStoreError> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| DocumentStoreError::InvalidName(name.to_string()))
}

fn io_error(key: &DocumentKey, e: std::io::Error) -> DocumentStoreError {
    if e.kind() == ErrorKind::NotFound {
        DocumentStoreError::NotFound(key.to_string())
    } else {
        DocumentStoreError::IoError(e.to_string())
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn exists(&self, key: &DocumentKey) -> Result<bool, DocumentStoreError> {
        let path = self.file_path(key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))
    }

    async fn read(&self, key: &DocumentKey) -> Result<String, DocumentStoreError> {
        let path = self.file_path(key)?;
        fs::read_to_string(&path).await.map_err(|e| io_error(key, e))
    }

    async fn write(&self, key: &DocumentKey, contents: &str) -> Result<(), DocumentStoreError> {
        let path = self.file_path(key)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DocumentStoreError::IoError(e.to_string()))?;
        }
        fs::write(&path, contents)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))?;
        tracing::debug!(document = %key, "document written");
        Ok(())
    }

    async fn delete(&self, key: &DocumentKey) -> Result<(), DocumentStoreError> {
        let path = self.file_path(key)?;
        fs::remove_file(&path).await.map_err(|e| io_error(key, e))?;
        tracing::debug!(document = %key, "document deleted");
        Ok(())
    }
}
