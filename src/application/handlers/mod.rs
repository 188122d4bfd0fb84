//! Chat command handlers.
//!
//! Each handler owns one top-level command and is registered with the
//! [`EventDispatcher`](super::dispatcher::EventDispatcher).

mod order_handler;

pub use order_handler::{OrderCommand, OrderCommandHandler, ORDER_COMMAND};
