//! In-Memory Document Store Adapter
//!
//! Keeps documents in a map keyed by [`DocumentKey`].
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{DocumentKey, DocumentStore, DocumentStoreError, Tier};

/// In-memory storage for documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentKey, String>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached-tier document
    pub async fn clear_cache(&self) {
        self.documents
            .write()
            .await
            .retain(|key, _| key.tier != Tier::Cached);
    }

    /// Number of documents in one namespace and tier
    pub async fn count(&self, namespace: &str, tier: Tier) -> usize {
        self.documents
            .read()
            .await
            .keys()
            .filter(|k| k.namespace == namespace && k.tier == tier)
            .count()
    }

    /// Filenames in one namespace and tier, sorted
    pub async fn filenames(&self, namespace: &str, tier: Tier) -> Vec<String> {
        let mut names: Vec<String> = self
            .documents
            .read()
            .await
            .keys()
            .filter(|k| k.namespace == namespace && k.tier == tier)
            .map(|k| k.filename.clone())
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn exists(&self, key: &DocumentKey) -> Result<bool, DocumentStoreError> {
        Ok(self.documents.read().await.contains_key(key))
    }

    async fn read(&self, key: &DocumentKey) -> Result<String, DocumentStoreError> {
        self.documents
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| DocumentStoreError::NotFound(key.to_string()))
    }

    async fn write(&self, key: &DocumentKey, contents: &str) -> Result<(), DocumentStoreError> {
        self.documents
            .write()
            .await
            .insert(key.clone(), contents.to_string());
        Ok(())
    }

    async fn delete(&self, key: &DocumentKey) -> Result<(), DocumentStoreError> {
        self.documents
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| DocumentStoreError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_delete() {
        let store = InMemoryDocumentStore::new();
        let key = DocumentKey::cached("H", "a.toml");

        store.write(&key, "x").await.unwrap();
        assert_eq!(store.read(&key).await.unwrap(), "x");
        assert_eq!(store.filenames("H", Tier::Cached).await, vec!["a.toml"]);

        store.delete(&key).await.unwrap();
        assert!(store.read(&key).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn clear_cache_keeps_persistent_documents() {
        let store = InMemoryDocumentStore::new();
        store.write(&DocumentKey::cached("H", "a"), "x").await.unwrap();
        store.write(&DocumentKey::persistent("H", "b"), "y").await.unwrap();

        store.clear_cache().await;

        assert_eq!(store.count("H", Tier::Cached).await, 0);
        assert_eq!(store.count("H", Tier::Persistent).await, 1);
    }
}
