//! Messaging Adapters
//!
//! - **ConsoleGateway** - Writes replies to stdout (or any async writer)
//! - **RecordingGateway** - Keeps replies in memory (testing)

mod console_gateway;
mod recording_gateway;

pub use console_gateway::ConsoleGateway;
pub use recording_gateway::{MessageKind, RecordingGateway, SentMessage};
