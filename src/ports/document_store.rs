//! Document Store Port - Interface for whole-document persistence.
//!
//! Documents are addressed by handler namespace, filename and storage tier.
//! Every write replaces the full document; there is no patching and no
//! optimistic-concurrency check.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Where a document lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Scratch space, cleared when the process shuts down. Orders live here.
    Cached,
    /// Durable across restarts. Catalog and ledger links live here.
    Persistent,
}

/// On-disk encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<String, DocumentStoreError> {
        match self {
            DocumentFormat::Toml => toml::to_string_pretty(value)
                .map_err(|e| DocumentStoreError::SerializationFailed(e.to_string())),
            DocumentFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|e| DocumentStoreError::SerializationFailed(e.to_string())),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, DocumentStoreError> {
        match self {
            DocumentFormat::Toml => toml::from_str(text)
                .map_err(|e| DocumentStoreError::DeserializationFailed(e.to_string())),
            DocumentFormat::Json => serde_json::from_str(text)
                .map_err(|e| DocumentStoreError::DeserializationFailed(e.to_string())),
        }
    }
}

/// Address of one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub namespace: String,
    pub filename: String,
    pub tier: Tier,
}

impl DocumentKey {
    pub fn new(namespace: impl Into<String>, filename: impl Into<String>, tier: Tier) -> Self {
        Self {
            namespace: namespace.into(),
            filename: filename.into(),
            tier,
        }
    }

    pub fn cached(namespace: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::new(namespace, filename, Tier::Cached)
    }

    pub fn persistent(namespace: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::new(namespace, filename, Tier::Persistent)
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({:?})", self.namespace, self.filename, self.tier)
    }
}

/// Errors that can occur during document store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("Dokument nicht gefunden: {0}")]
    NotFound(String),

    #[error("Ungültiger Dateiname: {0}")]
    InvalidName(String),

    #[error("Fehler beim Serialisieren: {0}")]
    SerializationFailed(String),

    #[error("Fehler beim Deserialisieren: {0}")]
    DeserializationFailed(String),

    #[error("IO Fehler: {0}")]
    IoError(String),
}

impl DocumentStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocumentStoreError::NotFound(_))
    }
}

impl From<DocumentStoreError> for DomainError {
    fn from(err: DocumentStoreError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for reading and writing whole documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether a document exists
    async fn exists(&self, key: &DocumentKey) -> Result<bool, DocumentStoreError>;

    /// Read the raw document text
    ///
    /// # Errors
    /// Returns `DocumentStoreError::NotFound` if no document exists
    async fn read(&self, key: &DocumentKey) -> Result<String, DocumentStoreError>;

    /// Replace the document with `contents`, creating it if needed
    async fn write(&self, key: &DocumentKey, contents: &str) -> Result<(), DocumentStoreError>;

    /// Delete a document
    ///
    /// # Errors
    /// Returns `DocumentStoreError::NotFound` if no document exists
    async fn delete(&self, key: &DocumentKey) -> Result<(), DocumentStoreError>;
}

/// Reads and decodes a typed document.
pub async fn load_document<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &DocumentKey,
    format: DocumentFormat,
) -> Result<T, DocumentStoreError> {
    let text = store.read(key).await?;
    format.decode(&text)
}

/// Encodes and writes a typed document.
pub async fn save_document<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    key: &DocumentKey,
    format: DocumentFormat,
    value: &T,
) -> Result<(), DocumentStoreError> {
    let text = format.encode(value)?;
    store.write(key, &text).await
}
