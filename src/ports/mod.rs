//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - Whole-document persistence in a cached or persistent tier
//! - `MessagingGateway` - Outbound chat replies
//! - `Ledger` - The external tally ledger used for settlement

mod document_store;
mod ledger;
mod messaging_gateway;

pub use document_store::{
    load_document, save_document, DocumentFormat, DocumentKey, DocumentStore, DocumentStoreError,
    Tier,
};
pub use ledger::{
    find_account, select_account, Ledger, LedgerError, LedgerUser, TransactionReceipt,
    TransactionRequest, UserSearchResult,
};
pub use messaging_gateway::{GatewayError, MessagingGateway};
