//! Recording messaging gateway for tests.
//!
//! Keeps every outbound message in memory and can be told to fail sends.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{GatewayError, MessagingGateway};

/// Kind of outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Formatted,
}

/// One message handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub room: String,
    pub kind: MessageKind,
    pub body: String,
}

#[derive(Default)]
struct RecordingState {
    sent: Vec<SentMessage>,
    fail_sends: bool,
}

#[derive(Clone, Default)]
pub struct RecordingGateway {
    inner: Arc<Mutex<RecordingState>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RecordingState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every following send fails (the message is still recorded).
    pub fn fail_sends(&self, fail: bool) {
        self.state().fail_sends = fail;
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.state().sent.clone()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.state().sent.last().cloned()
    }

    pub fn clear(&self) {
        self.state().sent.clear();
    }

    fn record(&self, room: &str, kind: MessageKind, body: &str) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.sent.push(SentMessage {
            room: room.to_string(),
            kind,
            body: body.to_string(),
        });
        if state.fail_sends {
            return Err(GatewayError::SendFailed("recording gateway set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, room: &str, text: &str) -> Result<(), GatewayError> {
        self.record(room, MessageKind::Text, text)
    }

    async fn send_formatted(&self, room: &str, html: &str) -> Result<(), GatewayError> {
        self.record(room, MessageKind::Formatted, html)
    }
}
