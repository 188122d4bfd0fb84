//! Application layer - Command routing, services, and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Services own one concern each (order lifecycle, ledger links, settlement);
//! the chat handler composes them behind the command router.

pub mod dispatcher;
pub mod handlers;
pub mod ledger_link_service;
pub mod order_service;
pub mod render;
pub mod router;
pub mod settlement_engine;

pub use dispatcher::{Dispatch, EventDispatcher, InboundMessage, MessageHandler, Reply};
pub use handlers::{OrderCommand, OrderCommandHandler, ORDER_COMMAND};
pub use ledger_link_service::LedgerLinkService;
pub use order_service::{
    load_catalog, AddLineRequest, OrderService, CATALOG_FILENAME, HANDLER_NAMESPACE,
};
pub use router::{CommandRouter, RouterConfig};
pub use settlement_engine::SettlementEngine;
