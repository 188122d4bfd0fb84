//! Storage Adapters
//!
//! Implementations of the DocumentStore port.
//!
//! ## Available Adapters
//!
//! - **FileDocumentStore** - One file per document under a cached and a persistent root
//! - **InMemoryDocumentStore** - Documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDocumentStore, InMemoryDocumentStore};
//!
//! // Production: file-based storage
//! let store = FileDocumentStore::new("./data", "./data");
//!
//! // Testing: in-memory storage
//! let store = InMemoryDocumentStore::new();
//! ```

mod file_document_store;
mod in_memory_document_store;

pub use file_document_store::FileDocumentStore;
pub use in_memory_document_store::InMemoryDocumentStore;
