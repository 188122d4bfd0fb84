//! Messaging Gateway Port - Outbound chat messages.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Nachricht konnte nicht gesendet werden: {0}")]
    SendFailed(String),
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::GatewayError, err.to_string())
    }
}

/// Port for sending replies into a chat room.
///
/// Callers never retry; a failed send is logged and reported as undelivered.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a plain-text message
    async fn send_text(&self, room: &str, text: &str) -> Result<(), GatewayError>;

    /// Send an HTML-formatted message
    async fn send_formatted(&self, room: &str, html: &str) -> Result<(), GatewayError>;
}
