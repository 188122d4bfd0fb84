//! EventDispatcher - serial fan-in of chat messages to command handlers.
//!
//! Each inbound message is offered to the registered handlers in order. The
//! first handler that claims it runs to completion and its result, success
//! or error, becomes exactly one outbound message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{DomainError, ErrorCategory, UserId};
use crate::ports::MessagingGateway;

/// A chat message as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub event_id: String,
    pub room: String,
    pub sender: UserId,
    pub body: String,
}

/// What a handler wants sent back to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Html(String),
}

/// A top-level chat command.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this handler is responsible for the message.
    fn claims(&self, message: &InboundMessage) -> bool;

    async fn handle(&self, message: &InboundMessage) -> Result<Reply, DomainError>;
}

/// Result of dispatching one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Own message, or no handler claimed it. Nothing was sent.
    Ignored,
    /// One reply was sent.
    Delivered,
    /// One reply was attempted and the gateway rejected it.
    DeliveryFailed,
}

pub struct EventDispatcher {
    bot: UserId,
    handlers: Vec<Arc<dyn MessageHandler>>,
    gateway: Arc<dyn MessagingGateway>,
}

impl EventDispatcher {
    /// `bot` is the identity the replies are sent as.
    pub fn new(bot: UserId, gateway: Arc<dyn MessagingGateway>) -> Self {
        Self {
            bot,
            handlers: Vec::new(),
            gateway,
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn MessageHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub async fn dispatch(&self, message: &InboundMessage) -> Dispatch {
        if message.sender == self.bot {
            return Dispatch::Ignored;
        }
        let Some(handler) = self.handlers.iter().find(|h| h.claims(message)) else {
            return Dispatch::Ignored;
        };

        debug!(handler = handler.name(), event = %message.event_id, "dispatching message");
        let reply = match handler.handle(message).await {
            Ok(reply) => reply,
            Err(err) => {
                log_failure(handler.name(), &err);
                Reply::Text(err.user_message())
            }
        };

        let sent = match &reply {
            Reply::Text(text) => self.gateway.send_text(&message.room, text).await,
            Reply::Html(html) => self.gateway.send_formatted(&message.room, html).await,
        };
        match sent {
            Ok(()) => Dispatch::Delivered,
            Err(e) => {
                error!(handler = handler.name(), room = %message.room, error = %e, "reply could not be sent");
                Dispatch::DeliveryFailed
            }
        }
    }
}

fn log_failure(handler: &str, err: &DomainError) {
    match err.category() {
        ErrorCategory::ExternalService | ErrorCategory::Persistence | ErrorCategory::Internal => {
            warn!(handler, code = %err.code, error = %err.message, "command failed")
        }
        _ => info!(handler, code = %err.code, error = %err.message, "command rejected"),
    }
}
