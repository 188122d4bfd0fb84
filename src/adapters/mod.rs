//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Document stores (files, memory)
//! - `ledger` - Strichliste ledger (HTTP, mock)
//! - `messaging` - Chat reply gateways (console, recording)

pub mod ledger;
pub mod messaging;
pub mod storage;

pub use ledger::{HttpLedger, MockLedger};
pub use messaging::{ConsoleGateway, RecordingGateway};
pub use storage::{FileDocumentStore, InMemoryDocumentStore};
